//! Built-in content tools for Pagewright.
//!
//! Each tool turns one text argument into one page element by making a
//! single stateless model call:
//!
//! | tool              | element       |
//! |-------------------|---------------|
//! | `essay_writer`    | `Text`        |
//! | `streamlit_coder` | `Code`        |
//! | `llm_call`        | `LlmResponse` |
//!
//! The [`FinalReviewer`] is not a tool the model can call; the page
//! assembler runs it once over the merged code.

pub mod essay_writer;
pub mod final_reviewer;
pub mod llm_call;
pub mod streamlit_coder;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use pagewright_core::error::{ProviderError, ToolError};
use pagewright_core::tool::ToolRegistry;
use pagewright_providers::ModelGateway;

pub use essay_writer::EssayWriterTool;
pub use final_reviewer::FinalReviewer;
pub use llm_call::LlmCallTool;
pub use streamlit_coder::StreamlitCoderTool;

/// Create the registry of the three content tools, all sharing one gateway.
pub fn default_registry(gateway: Arc<ModelGateway>, essay_words: u32) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(
        EssayWriterTool::new(gateway.clone()).with_words(essay_words),
    ));
    registry.register(Box::new(StreamlitCoderTool::new(gateway.clone())));
    registry.register(Box::new(LlmCallTool::new(gateway)));
    registry
}

pub(crate) fn provider_failure(tool_name: &str, source: ProviderError) -> ToolError {
    ToolError::Provider {
        tool_name: tool_name.to_string(),
        source,
    }
}
