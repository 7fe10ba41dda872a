//! Shared test helpers for tool tests.

use std::sync::{Arc, Mutex};

use pagewright_core::error::ProviderError;
use pagewright_core::message::Message;
use pagewright_core::provider::{Provider, ProviderRequest, ProviderResponse};
use pagewright_providers::ModelGateway;

/// A provider that answers every request with the same text and keeps
/// the prompts it was sent.
pub struct EchoingProvider {
    reply: Result<String, ProviderError>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Provider for EchoingProvider {
    fn name(&self) -> &str {
        "echoing_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        let text = self.reply.clone()?;
        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "mock-model".into(),
        })
    }
}

/// A gateway whose provider always replies with `reply`.
pub fn gateway_replying(reply: &str) -> (Arc<ModelGateway>, Arc<EchoingProvider>) {
    build(Ok(reply.to_string()))
}

/// A gateway whose provider always fails with `err`.
pub fn gateway_failing(err: ProviderError) -> (Arc<ModelGateway>, Arc<EchoingProvider>) {
    build(Err(err))
}

fn build(reply: Result<String, ProviderError>) -> (Arc<ModelGateway>, Arc<EchoingProvider>) {
    let provider = Arc::new(EchoingProvider {
        reply,
        prompts: Mutex::new(Vec::new()),
    });
    let gateway = Arc::new(ModelGateway::new(provider.clone(), "mock-model", 0.7));
    (gateway, provider)
}
