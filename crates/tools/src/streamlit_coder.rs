//! Streamlit coder — generates UI code for one piece of the page.
//!
//! The prompt tells the model to import the project's `GroqCalls` helper so
//! that generated widgets can themselves call a model at runtime.

use std::sync::Arc;

use async_trait::async_trait;
use pagewright_core::content::ContentElement;
use pagewright_core::error::ToolError;
use pagewright_core::tool::Tool;
use pagewright_providers::ModelGateway;
use tracing::debug;

pub struct StreamlitCoderTool {
    gateway: Arc<ModelGateway>,
}

impl StreamlitCoderTool {
    pub fn new(gateway: Arc<ModelGateway>) -> Self {
        Self { gateway }
    }
}

pub(crate) fn code_prompt(description: &str) -> String {
    format!(
        r#"
    Write Streamlit code for: {description}

    Make sure to include the following at the top of the file:
    from LLMCall import GroqCalls

    When using LLM calls, use the GroqCalls function like this:

    response = GroqCalls(prompt)
    Also concatenate the prompt for the tool in prompt variable to customise responses.
    Ensure the code is complete and executable.
    "#
    )
}

#[async_trait]
impl Tool for StreamlitCoderTool {
    fn name(&self) -> &str {
        "streamlit_coder"
    }

    fn description(&self) -> &str {
        "Generates Streamlit code for the specified functionality and adds it to the page. \
         This action can be used to create any Streamlit element, including titles, text, \
         headers, buttons, and more complex components."
    }

    fn example(&self) -> &str {
        "Create a title saying 'Welcome to Our AI App' and add a paragraph introducing the app"
    }

    async fn invoke(&self, argument: &str) -> Result<ContentElement, ToolError> {
        debug!(description = %argument, "Generating Streamlit code");
        let code = self
            .gateway
            .call(&code_prompt(argument))
            .await
            .map_err(|e| crate::provider_failure(self.name(), e))?;
        Ok(ContentElement::Code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gateway_replying;

    #[test]
    fn prompt_embeds_description_and_helper_import() {
        let prompt = code_prompt("a button that tells a joke");
        assert!(prompt.contains("Write Streamlit code for: a button that tells a joke"));
        assert!(prompt.contains("from LLMCall import GroqCalls"));
        assert!(prompt.contains("response = GroqCalls(prompt)"));
    }

    #[tokio::test]
    async fn wraps_completion_as_code() {
        let (gateway, provider) = gateway_replying("import streamlit as st\nst.title('Hi')");
        let tool = StreamlitCoderTool::new(gateway);

        let element = tool.invoke("a title saying Hi").await.unwrap();
        assert_eq!(
            element,
            ContentElement::Code("import streamlit as st\nst.title('Hi')".into())
        );
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }
}
