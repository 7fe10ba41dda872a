//! Shared test helpers for the build loop and assembler tests.

use std::sync::{Arc, Mutex};

use pagewright_core::error::ProviderError;
use pagewright_core::message::{Message, Role};
use pagewright_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use pagewright_providers::ModelGateway;

/// A mock provider that returns a sequence of scripted replies.
///
/// Each call to `complete` returns the next reply in the queue.
/// Panics if more calls are made than replies provided.
pub struct ScriptedProvider {
    replies: Vec<Result<String, ProviderError>>,
    call_count: Mutex<usize>,
    /// The last user message of every request, in call order.
    pub prompts: Mutex<Vec<String>>,
    /// Number of messages in every request, in call order.
    pub history_lengths: Mutex<Vec<usize>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<&str>) -> Self {
        Self::with_results(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies,
            call_count: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
            history_lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        if *count >= self.replies.len() {
            panic!(
                "ScriptedProvider: no more replies (call #{}, have {})",
                *count,
                self.replies.len()
            );
        }

        let last_user = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(last_user);
        self.history_lengths.lock().unwrap().push(request.messages.len());

        let reply = self.replies[*count].clone();
        *count += 1;

        Ok(ProviderResponse {
            message: Message::assistant(reply?),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        })
    }
}

pub fn gateway_for(provider: Arc<ScriptedProvider>) -> Arc<ModelGateway> {
    Arc::new(ModelGateway::new(provider, "mock-model", 0.0))
}
