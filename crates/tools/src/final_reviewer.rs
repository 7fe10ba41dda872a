//! Final reviewer — rewrites merged page code into one clean block.
//!
//! The reviewer is instructed to reorder and tidy the code, strip markdown
//! fences and commentary, and never add new elements.

use std::sync::Arc;

use pagewright_core::content::ContentElement;
use pagewright_core::error::ProviderError;
use pagewright_providers::ModelGateway;
use tracing::debug;

pub struct FinalReviewer {
    gateway: Arc<ModelGateway>,
}

impl FinalReviewer {
    pub fn new(gateway: Arc<ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Run one review pass over `code` and wrap the result as `Code`.
    pub async fn review(&self, code: &str) -> Result<ContentElement, ProviderError> {
        debug!(bytes = code.len(), "Reviewing merged page code");
        let reviewed = self.gateway.call(&review_prompt(code)).await?;
        Ok(ContentElement::Code(reviewed))
    }
}

pub(crate) fn review_prompt(code: &str) -> String {
    format!(
        r#"
    You are a production streamlit app developer. You have been given a streamlit python code which contains
    all the necessary imports and functions. Although its not clean and few features maybe here and there.
    With what has been given to you clean the code reorder it and make it efficient. DONT ADD ANY new element to the code.
    3. Remove any unnecessary comments, text, or formatting such as ```python or ```
    4. Ensure proper indentation and correct function structure.
    5. Use correct Streamlit functions and syntax.
    6. Make sure the code is clean, efficient, and executable.
    7. Do not include any explanations or comments in your output.

    Here's the code to review and rewrite:

    {code}

    Please provide only the corrected, executable Streamlit code without any additional text or explanations.
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gateway_failing, gateway_replying};

    #[test]
    fn prompt_embeds_code_and_forbids_new_elements() {
        let prompt = review_prompt("st.title('a')");
        assert!(prompt.contains("st.title('a')"));
        assert!(prompt.contains("DONT ADD ANY new element"));
        assert!(prompt.contains("```python"));
    }

    #[tokio::test]
    async fn review_wraps_result_as_code() {
        let (gateway, provider) = gateway_replying("st.title('clean')");
        let reviewer = FinalReviewer::new(gateway);

        let element = reviewer.review("```python\nst.title('clean')\n```").await.unwrap();
        assert_eq!(element, ContentElement::Code("st.title('clean')".into()));
        assert!(provider.prompts.lock().unwrap()[0].contains("```python\nst.title('clean')"));
    }

    #[tokio::test]
    async fn review_failure_is_returned() {
        let (gateway, _) = gateway_failing(ProviderError::RateLimited {
            retry_after_secs: 5,
        });
        let reviewer = FinalReviewer::new(gateway);
        assert!(reviewer.review("x").await.is_err());
    }
}
