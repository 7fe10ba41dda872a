//! # Pagewright Core
//!
//! Domain types, traits, and error definitions for the Pagewright page
//! builder. This crate has **no framework dependencies**: it defines the
//! domain model that every other crate implements against.
//!
//! The two seams that matter most:
//! - [`Provider`]: anything that can turn a conversation into a completion
//! - [`Tool`]: anything that can turn one text argument into a [`ContentElement`]

pub mod content;
pub mod error;
pub mod event;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use content::{ContentElement, ContentKind, Page};
pub use error::{Error, Result};
pub use event::{DomainEvent, EventBus};
pub use message::{Conversation, ConversationId, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use tool::{Tool, ToolRegistry};
