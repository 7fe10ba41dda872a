//! LLM Provider implementations for Pagewright.
//!
//! All providers implement the `pagewright_core::Provider` trait.
//! The router selects the correct provider based on configuration, and
//! [`ModelGateway`] binds a provider to a model for the build loop and
//! the content tools.

pub mod gateway;
pub mod openai_compat;
pub mod router;

pub use gateway::ModelGateway;
pub use openai_compat::OpenAiCompatProvider;
pub use router::ProviderRouter;
