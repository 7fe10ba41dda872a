//! Page assembly: merge all code fragments, normalize them once, and append
//! the result after the other elements.

use pagewright_core::content::ContentElement;
use pagewright_core::error::ProviderError;
use pagewright_tools::FinalReviewer;
use tracing::{debug, info};

/// Joins code fragments before the normalizer sees them.
pub const CODE_SEPARATOR: &str = "\n\n";

/// Split elements into one merged code blob and the non-code elements in
/// their original order.
pub fn partition(elements: Vec<ContentElement>) -> (String, Vec<ContentElement>) {
    let mut code = Vec::new();
    let mut rest = Vec::new();
    for element in elements {
        match element {
            ContentElement::Code(c) => code.push(c),
            other => rest.push(other),
        }
    }
    (code.join(CODE_SEPARATOR), rest)
}

pub struct PageAssembler {
    reviewer: FinalReviewer,
    /// Run the normalizer even when there is no code.
    normalize_empty: bool,
}

impl PageAssembler {
    pub fn new(reviewer: FinalReviewer) -> Self {
        Self {
            reviewer,
            normalize_empty: false,
        }
    }

    pub fn with_normalize_empty(mut self, enabled: bool) -> Self {
        self.normalize_empty = enabled;
        self
    }

    /// Produce the final element order: every non-code element as produced,
    /// then at most one normalized `Code` element.
    pub async fn assemble(
        &self,
        elements: Vec<ContentElement>,
    ) -> Result<Vec<ContentElement>, ProviderError> {
        let total = elements.len();
        let (code, rest) = partition(elements);

        if code.trim().is_empty() && !self.normalize_empty {
            debug!(elements = rest.len(), "No code to normalize");
            return Ok(rest);
        }

        let normalized = self.reviewer.review(&code).await?;
        let mut assembled = rest;
        assembled.push(normalized);

        info!(
            input = total,
            output = assembled.len(),
            "Page assembled with normalized code"
        );
        Ok(assembled)
    }
}
