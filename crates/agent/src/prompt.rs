//! System instruction that teaches the model the action protocol.

use pagewright_core::tool::ToolRegistry;

const PREAMBLE: &str = "\
You run in a loop of Thought, Action, PAUSE, Observation.
At the end of the loop you output an Answer
Use Thought to describe your thoughts about the question you have been asked.
Use Action to perform one of the actions available to you - then return PAUSE.
Observation will be the result of running those actions.

Your available actions are:

";

const EXAMPLE_SESSION: &str = "\
Example session:

Question: Create a page about AI with a title, an introductory paragraph, a detailed essay, and a button to generate AI facts.
Thought: The user wants a page about AI with several elements. I'll add these elements one by one using the streamlit_coder and essay_writer actions.
Action: streamlit_coder: Create a title saying 'Artificial Intelligence: Shaping Our Future' and add an introductory paragraph about AI's impact on society
PAUSE

You will be called again with this:

Observation: streamlit_coder added

Thought: Now I need to add a detailed essay about AI's impact on society.
Action: essay_writer: The impact of artificial intelligence on modern society
PAUSE

You will be called again with this:

Observation: essay_writer added

Thought: Lastly, I need to add a button to generate AI facts.
Action: streamlit_coder: Create a button that, when clicked, displays a random AI fact using an LLM call
PAUSE

You will be called again with this:

Observation: streamlit_coder added

If you have all elements as requested, output it as the Answer.

Answer: Page created with a title, an introductory paragraph, a detailed essay about AI's impact on modern society, and an interactive button to generate AI facts.

Only use one Action per reply. The generated code is reviewed and merged automatically once you give the Answer.
";

/// Build the system instruction for the given tool catalogue.
pub fn system_prompt(tools: &ToolRegistry) -> String {
    format!("{PREAMBLE}{}{EXAMPLE_SESSION}", tools.describe())
}
