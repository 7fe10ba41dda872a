//! Free-form model answer, passed through without a template.

use std::sync::Arc;

use async_trait::async_trait;
use pagewright_core::content::ContentElement;
use pagewright_core::error::ToolError;
use pagewright_core::tool::Tool;
use pagewright_providers::ModelGateway;

pub struct LlmCallTool {
    gateway: Arc<ModelGateway>,
}

impl LlmCallTool {
    pub fn new(gateway: Arc<ModelGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for LlmCallTool {
    fn name(&self) -> &str {
        "llm_call"
    }

    fn description(&self) -> &str {
        "Makes an LLM call with the specified prompt and adds the response to the page."
    }

    fn example(&self) -> &str {
        "What is the capital of France?"
    }

    async fn invoke(&self, argument: &str) -> Result<ContentElement, ToolError> {
        let response = self
            .gateway
            .call(argument)
            .await
            .map_err(|e| crate::provider_failure(self.name(), e))?;
        Ok(ContentElement::LlmResponse(response))
    }
}
