//! Streamlit rendering of page elements.

use pagewright_core::content::{ContentElement, Page};

use crate::sanitize::escape_string;

/// Imports every generated page starts with.
pub const PAGE_HEADER: &str = "import streamlit as st\nfrom LLMCall import GroqCalls\n\n";

/// Render one element as a Streamlit snippet, followed by a blank line.
pub fn render_element(element: &ContentElement) -> String {
    match element {
        ContentElement::Text(text) => {
            format!("st.markdown('''{}''')\n\n", escape_string(text))
        }
        ContentElement::Code(code) => format!("{code}\n\n"),
        ContentElement::LlmResponse(text) => format!(
            "st.text_area('LLM Response', '''{}''', height=200)\n\n",
            escape_string(text)
        ),
    }
}

/// Render a whole page: header, then each element in order.
pub fn render_page(page: &Page) -> String {
    let mut out = String::from(PAGE_HEADER);
    for element in &page.elements {
        out.push_str(&render_element(element));
    }
    out
}
