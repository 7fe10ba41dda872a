//! Essay writer — adds a long-form composition to the page.

use std::sync::Arc;

use async_trait::async_trait;
use pagewright_core::content::ContentElement;
use pagewright_core::error::ToolError;
use pagewright_core::tool::Tool;
use pagewright_providers::ModelGateway;
use tracing::debug;

pub struct EssayWriterTool {
    gateway: Arc<ModelGateway>,
    words: u32,
}

impl EssayWriterTool {
    pub fn new(gateway: Arc<ModelGateway>) -> Self {
        Self {
            gateway,
            words: 500,
        }
    }

    /// Set the requested essay length.
    pub fn with_words(mut self, words: u32) -> Self {
        self.words = words;
        self
    }

    fn prompt(&self, topic: &str) -> String {
        format!(" write me a {} word essay on topic: {topic}", self.words)
    }
}

#[async_trait]
impl Tool for EssayWriterTool {
    fn name(&self) -> &str {
        "essay_writer"
    }

    fn description(&self) -> &str {
        "Generates and adds a long-form essay on the specified topic to the page."
    }

    fn example(&self) -> &str {
        "The impact of artificial intelligence on modern society"
    }

    async fn invoke(&self, argument: &str) -> Result<ContentElement, ToolError> {
        debug!(topic = %argument, words = self.words, "Writing essay");
        let essay = self
            .gateway
            .call(&self.prompt(argument))
            .await
            .map_err(|e| crate::provider_failure(self.name(), e))?;
        Ok(ContentElement::Text(essay))
    }
}
