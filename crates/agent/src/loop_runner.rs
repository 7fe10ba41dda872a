//! The page-building loop.
//!
//! One call to [`PageAgent::run`] owns one conversation:
//!
//! 1. **Seed** the conversation with the protocol instruction and the query
//! 2. **Converse**: send the whole history, append the model's reply
//! 3. **Classify** the reply into an [`Intent`]
//! 4. **If action**: invoke the tool, keep its element, feed back an observation
//! 5. **If answer**: stop
//! 6. **Otherwise**: resend the last prompt (the query or latest observation)
//!
//! The loop never makes more than `max_iterations` round-trips. Hitting the
//! cap is not an error; the outcome is marked [`RunStatus::Incomplete`].
//! Any provider or tool failure aborts the run.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use pagewright_core::content::ContentElement;
use pagewright_core::error::Error;
use pagewright_core::event::{DomainEvent, EventBus};
use pagewright_core::message::{Conversation, Message};
use pagewright_core::tool::ToolRegistry;
use pagewright_providers::ModelGateway;
use tracing::{debug, info, warn};

use crate::prompt::system_prompt;
use crate::protocol::{
    Intent, IntentParser, OBSERVATION_TOOL_NOT_FOUND, TextActionParser, ToolInvocation,
    observation_added,
};

/// Default cap on model round-trips per build.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The model replied with an `Answer`.
    Completed,
    /// The iteration cap was reached first.
    Incomplete,
}

/// The result of one build-loop run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Elements produced by tools, in dispatch order.
    pub elements: Vec<ContentElement>,
    /// Model round-trips made.
    pub iterations: usize,
    /// Tools successfully invoked.
    pub tool_calls: usize,
    pub status: RunStatus,
    /// The full conversation, for inspection.
    pub conversation: Conversation,
}

pub struct PageAgent {
    /// Conversational model.
    gateway: Arc<ModelGateway>,
    /// Content tools.
    tools: Arc<ToolRegistry>,
    /// Reply classifier.
    parser: Box<dyn IntentParser>,
    /// Seed instruction.
    system_prompt: String,
    /// Maximum model round-trips.
    max_iterations: u32,
    event_bus: Arc<EventBus>,
}

impl PageAgent {
    pub fn new(gateway: Arc<ModelGateway>, tools: Arc<ToolRegistry>, event_bus: Arc<EventBus>) -> Self {
        let system_prompt = system_prompt(&tools);
        Self {
            gateway,
            tools,
            parser: Box::new(TextActionParser),
            system_prompt,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            event_bus,
        }
    }

    /// Set max iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Replace the seed instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Replace the reply classifier.
    pub fn with_parser(mut self, parser: Box<dyn IntentParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Run the loop for one query.
    pub async fn run(&self, query: &str) -> Result<RunOutcome, Error> {
        let mut conversation = Conversation::with_system(&self.system_prompt);
        let conversation_id = conversation.id.to_string();
        // Resent every turn until a tool result replaces it.
        let mut next_prompt = query.to_string();
        let mut elements = Vec::new();
        let mut tool_calls = 0usize;

        info!(
            model = %self.gateway.model(),
            max_iter = self.max_iterations,
            "Page build loop starting"
        );
        self.event_bus.publish(DomainEvent::BuildStarted {
            conversation_id: conversation_id.clone(),
            query_preview: query.chars().take(80).collect(),
            timestamp: Utc::now(),
        });

        for iteration in 1..=self.max_iterations as usize {
            if !next_prompt.is_empty() {
                conversation.push(Message::user(next_prompt.clone()));
            }

            let reply = self.gateway.converse(&mut conversation).await?;
            debug!(iteration, reply = %reply, "Model replied");
            self.event_bus.publish(DomainEvent::ResponseGenerated {
                conversation_id: conversation_id.clone(),
                model: self.gateway.model().to_string(),
                iteration,
                timestamp: Utc::now(),
            });

            match self.parser.classify(&reply) {
                Intent::ActionFound(invocation) => {
                    if !self.tools.contains(&invocation.tool) {
                        warn!(tool = %invocation.tool, "Model requested an unknown tool");
                        next_prompt = OBSERVATION_TOOL_NOT_FOUND.to_string();
                        continue;
                    }
                    let element = self.dispatch(&invocation).await?;
                    debug!(tool = %invocation.tool, kind = %element.kind(), "Element added");
                    elements.push(element);
                    tool_calls += 1;
                    next_prompt = observation_added(&invocation.tool);
                }
                Intent::Answered => {
                    info!(iterations = iteration, tool_calls, "Page build loop completed");
                    return Ok(RunOutcome {
                        elements,
                        iterations: iteration,
                        tool_calls,
                        status: RunStatus::Completed,
                        conversation,
                    });
                }
                Intent::Continue => {}
            }
        }

        warn!(
            max_iter = self.max_iterations,
            elements = elements.len(),
            "Page build loop hit the iteration cap without an answer"
        );
        Ok(RunOutcome {
            elements,
            iterations: self.max_iterations as usize,
            tool_calls,
            status: RunStatus::Incomplete,
            conversation,
        })
    }

    async fn dispatch(&self, invocation: &ToolInvocation) -> Result<ContentElement, Error> {
        let start = Instant::now();
        let result = self
            .tools
            .invoke(&invocation.tool, &invocation.argument)
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        self.event_bus.publish(DomainEvent::ToolExecuted {
            tool_name: invocation.tool.clone(),
            success: result.is_ok(),
            duration_ms,
            timestamp: Utc::now(),
        });

        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedProvider, gateway_for};
    use pagewright_core::error::{ProviderError, ToolError};
    use pagewright_core::message::Role;
    use pagewright_tools::default_registry;

    fn agent_with(
        agent_replies: Vec<&str>,
        tool_replies: Vec<&str>,
    ) -> (PageAgent, Arc<ScriptedProvider>, Arc<ScriptedProvider>) {
        let agent_provider = Arc::new(ScriptedProvider::new(agent_replies));
        let tool_provider = Arc::new(ScriptedProvider::new(tool_replies));
        let tools = Arc::new(default_registry(gateway_for(tool_provider.clone()), 500));
        let agent = PageAgent::new(
            gateway_for(agent_provider.clone()),
            tools,
            Arc::new(EventBus::default()),
        );
        (agent, agent_provider, tool_provider)
    }

    #[tokio::test]
    async fn essay_then_llm_call_then_answer() {
        let (agent, agent_provider, tool_provider) = agent_with(
            vec![
                "Thought: essay first\nAction: essay_writer: space\nPAUSE",
                "Thought: now a question\nAction: llm_call: hi\nPAUSE",
                "Answer: done",
            ],
            vec!["An essay about space.", "Hello!"],
        );

        let outcome = agent.run("Make a page about space").await.unwrap();

        assert_eq!(outcome.status, RunStatus::Completed);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.tool_calls, 2);
        assert_eq!(
            outcome.elements,
            vec![
                ContentElement::Text("An essay about space.".into()),
                ContentElement::LlmResponse("Hello!".into()),
            ]
        );
        assert_eq!(agent_provider.call_count(), 3);
        assert_eq!(tool_provider.call_count(), 2);

        let prompts = agent_provider.prompts.lock().unwrap();
        assert_eq!(prompts[0], "Make a page about space");
        assert_eq!(prompts[1], "Observation: essay_writer added");
        assert_eq!(prompts[2], "Observation: llm_call added");
    }

    #[tokio::test]
    async fn conversation_is_seeded_with_system_then_query() {
        let (agent, _, _) = agent_with(vec!["Answer: nothing to add"], vec![]);
        let outcome = agent.run("Empty page please").await.unwrap();

        let messages = outcome.conversation.messages();
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Action"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Empty page please");
        assert_eq!(messages[2].role, Role::Assistant);
        assert!(outcome.elements.is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_is_fed_back_not_fatal() {
        let (agent, agent_provider, tool_provider) = agent_with(
            vec!["Action: final_reviewer: all the code\nPAUSE", "Answer: ok"],
            vec![],
        );

        let outcome = agent.run("build").await.unwrap();

        assert_eq!(outcome.status, RunStatus::Completed);
        assert!(outcome.elements.is_empty());
        assert_eq!(tool_provider.call_count(), 0);
        assert_eq!(
            agent_provider.prompts.lock().unwrap()[1],
            "Observation: Tool not found"
        );
    }

    #[tokio::test]
    async fn replies_without_markers_do_not_invoke_tools() {
        let (agent, agent_provider, tool_provider) = agent_with(
            vec![
                "Thought: hmm",
                "Action: essay_writer: space (forgot the pause)",
                "Answer: done",
            ],
            vec![],
        );

        let outcome = agent.run("build").await.unwrap();

        assert_eq!(outcome.iterations, 3);
        assert!(outcome.elements.is_empty());
        assert_eq!(tool_provider.call_count(), 0);
        // The query is resent after each turn that asked for nothing.
        assert_eq!(*agent_provider.history_lengths.lock().unwrap(), vec![2, 4, 6]);
        assert_eq!(*agent_provider.prompts.lock().unwrap(), vec!["build"; 3]);
    }

    #[tokio::test]
    async fn idle_turn_resends_prompt_so_roles_alternate() {
        let (agent, agent_provider, _) = agent_with(vec!["Thought: hmm", "Answer: done"], vec![]);

        let outcome = agent.run("A page about tea").await.unwrap();

        assert_eq!(*agent_provider.history_lengths.lock().unwrap(), vec![2, 4]);
        let roles: Vec<Role> = outcome.conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(outcome.conversation.messages()[3].content, "A page about tea");
    }

    #[tokio::test]
    async fn idle_turn_after_tool_resends_observation() {
        let (agent, agent_provider, _) = agent_with(
            vec!["Action: llm_call: hi\nPAUSE", "Thought: let me check", "Answer: done"],
            vec!["hello"],
        );

        agent.run("build").await.unwrap();

        let prompts = agent_provider.prompts.lock().unwrap();
        assert_eq!(prompts[1], "Observation: llm_call added");
        assert_eq!(prompts[2], "Observation: llm_call added");
    }

    #[tokio::test]
    async fn custom_system_prompt_seeds_conversation() {
        let (agent, agent_provider, _) = agent_with(vec!["Answer: done"], vec![]);
        let agent = agent.with_system_prompt("Only ever answer.");

        let outcome = agent.run("build").await.unwrap();

        let first = &outcome.conversation.messages()[0];
        assert_eq!(first.role, Role::System);
        assert_eq!(first.content, "Only ever answer.");
        assert_eq!(agent_provider.call_count(), 1);
    }

    #[tokio::test]
    async fn iteration_cap_marks_incomplete() {
        let replies = vec!["Thought: still thinking"; 10];
        let (agent, agent_provider, _) = agent_with(replies, vec![]);

        let outcome = agent.run("build").await.unwrap();

        assert_eq!(outcome.status, RunStatus::Incomplete);
        assert_eq!(outcome.iterations, 10);
        assert_eq!(agent_provider.call_count(), 10);
    }

    #[tokio::test]
    async fn custom_cap_keeps_accumulated_elements() {
        let (agent, agent_provider, _) = agent_with(
            vec![
                "Action: streamlit_coder: a title\nPAUSE",
                "Action: streamlit_coder: a button\nPAUSE",
            ],
            vec!["st.title('x')", "st.button('y')"],
        );
        let agent = agent.with_max_iterations(2);

        let outcome = agent.run("build").await.unwrap();

        assert_eq!(outcome.status, RunStatus::Incomplete);
        assert_eq!(outcome.elements.len(), 2);
        assert!(outcome.elements.iter().all(|e| e.is_code()));
        assert_eq!(agent_provider.call_count(), 2);
    }

    #[tokio::test]
    async fn tool_failure_aborts_run() {
        let agent_provider = Arc::new(ScriptedProvider::new(vec![
            "Action: essay_writer: space\nPAUSE",
        ]));
        let tool_provider = Arc::new(ScriptedProvider::with_results(vec![Err(
            ProviderError::RateLimited {
                retry_after_secs: 5,
            },
        )]));
        let tools = Arc::new(default_registry(gateway_for(tool_provider), 500));
        let agent = PageAgent::new(
            gateway_for(agent_provider.clone()),
            tools,
            Arc::new(EventBus::default()),
        );

        let err = agent.run("build").await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::Provider { .. })));
        assert_eq!(agent_provider.call_count(), 1);
    }

    #[tokio::test]
    async fn agent_provider_failure_aborts_run() {
        let agent_provider = Arc::new(ScriptedProvider::with_results(vec![Err(
            ProviderError::Network("offline".into()),
        )]));
        let tools = Arc::new(default_registry(
            gateway_for(Arc::new(ScriptedProvider::new(vec![]))),
            500,
        ));
        let agent = PageAgent::new(gateway_for(agent_provider), tools, Arc::new(EventBus::default()));

        let err = agent.run("build").await.unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Network(_))));
    }

    #[tokio::test]
    async fn events_are_published_per_turn_and_tool() {
        let (agent, _, _) = agent_with(
            vec!["Action: llm_call: hi\nPAUSE", "Answer: done"],
            vec!["hello"],
        );
        let mut rx = agent.event_bus.subscribe();

        agent.run("build").await.unwrap();

        let mut tools_run = 0;
        let mut responses = 0;
        while let Ok(event) = rx.try_recv() {
            match event.as_ref() {
                DomainEvent::ToolExecuted { success, .. } => {
                    assert!(success);
                    tools_run += 1;
                }
                DomainEvent::ResponseGenerated { .. } => responses += 1,
                _ => {}
            }
        }
        assert_eq!(tools_run, 1);
        assert_eq!(responses, 2);
    }

    #[tokio::test]
    async fn custom_parser_replaces_text_protocol() {
        struct AlwaysAnswer;
        impl IntentParser for AlwaysAnswer {
            fn classify(&self, _reply: &str) -> Intent {
                Intent::Answered
            }
        }

        let (agent, _, tool_provider) =
            agent_with(vec!["Action: essay_writer: space\nPAUSE"], vec![]);
        let agent = agent.with_parser(Box::new(AlwaysAnswer));

        let outcome = agent.run("build").await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert_eq!(tool_provider.call_count(), 0);
    }
}
