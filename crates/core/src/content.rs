//! Generated page content.
//!
//! Every tool invocation yields exactly one [`ContentElement`]. The build
//! loop accumulates them in order, the assembler merges the code-bearing
//! ones, and the result is wrapped in a [`Page`] for persistence.

use serde::{Deserialize, Serialize};

/// The tag of a [`ContentElement`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Code,
    LlmResponse,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentKind::Text => "text",
            ContentKind::Code => "code",
            ContentKind::LlmResponse => "llm_response",
        };
        f.write_str(s)
    }
}

/// A single unit of generated content. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "content", rename_all = "snake_case")]
pub enum ContentElement {
    /// Long-form prose, rendered as markdown.
    Text(String),
    /// UI source code, emitted verbatim.
    Code(String),
    /// A free-form model answer, rendered in a labelled text area.
    LlmResponse(String),
}

impl ContentElement {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentElement::Text(_) => ContentKind::Text,
            ContentElement::Code(_) => ContentKind::Code,
            ContentElement::LlmResponse(_) => ContentKind::LlmResponse,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ContentElement::Text(s) | ContentElement::Code(s) | ContentElement::LlmResponse(s) => s,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, ContentElement::Code(_))
    }
}

/// A finished page: a user-supplied name plus its ordered elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub elements: Vec<ContentElement>,
}

impl Page {
    pub fn new(name: impl Into<String>, elements: Vec<ContentElement>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Number of `Code` elements. An assembled page has at most one.
    pub fn code_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_code()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kind_and_content() {
        let el = ContentElement::LlmResponse("Paris".into());
        assert_eq!(el.kind(), ContentKind::LlmResponse);
        assert_eq!(el.content(), "Paris");
        assert!(!el.is_code());
        assert!(ContentElement::Code("st.title('x')".into()).is_code());
    }

    #[test]
    fn element_serializes_as_action_and_content() {
        let json = serde_json::to_value(ContentElement::LlmResponse("hi".into())).unwrap();
        assert_eq!(json["action"], "llm_response");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn page_counts_code_elements() {
        let page = Page::new(
            "Demo",
            vec![
                ContentElement::Text("intro".into()),
                ContentElement::Code("st.button('go')".into()),
            ],
        );
        assert_eq!(page.code_count(), 1);
        assert_eq!(ContentKind::Code.to_string(), "code");
    }
}
