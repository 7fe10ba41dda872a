//! Model gateway — a provider bound to one model and sampling setup.
//!
//! Exposes the two call flavors the rest of the system needs:
//! - [`ModelGateway::call`]: stateless, one prompt in, one completion out
//! - [`ModelGateway::converse`]: stateful, sends the whole conversation and
//!   appends the reply to it
//!
//! Failures are returned as [`ProviderError`] unchanged. Nothing here
//! retries.

use std::sync::Arc;

use pagewright_core::error::ProviderError;
use pagewright_core::message::{Conversation, Message};
use pagewright_core::provider::{Provider, ProviderRequest, ProviderResponse};
use tracing::debug;

#[derive(Clone)]
pub struct ModelGateway {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl ModelGateway {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Set the max tokens per completion.
    pub fn with_max_tokens(mut self, max: Option<u32>) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Stateless single-shot completion.
    pub async fn call(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self.send(vec![Message::user(prompt)]).await?;
        Ok(response.message.content.trim().to_string())
    }

    /// Stateful completion over the running conversation.
    ///
    /// The trimmed reply is appended to `conversation` as an assistant
    /// message and returned.
    pub async fn converse(&self, conversation: &mut Conversation) -> Result<String, ProviderError> {
        let response = self.send(conversation.messages().to_vec()).await?;
        let reply = response.message.content.trim().to_string();
        conversation.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    async fn send(&self, messages: Vec<Message>) -> Result<ProviderResponse, ProviderError> {
        debug!(
            provider = %self.provider.name(),
            model = %self.model,
            messages = messages.len(),
            "Model gateway request"
        );

        let request = ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stop: vec![],
        };
        self.provider.complete(request).await
    }
}
