//! # Pagewright Agent
//!
//! The page-building core:
//!
//! - [`protocol`]: the `Action:` / `PAUSE` / `Answer` text grammar and the
//!   [`IntentParser`] seam
//! - [`loop_runner`]: the bounded conversation loop that dispatches tools
//! - [`assembler`]: merges code fragments through the final reviewer
//! - [`pipeline`]: [`build_page`], loop → assembly → [`PageStore`]
//!
//! [`PageStore`]: pagewright_store::PageStore

pub mod assembler;
pub mod loop_runner;
pub mod pipeline;
pub mod prompt;
pub mod protocol;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assembler::{CODE_SEPARATOR, PageAssembler, partition};
pub use loop_runner::{DEFAULT_MAX_ITERATIONS, PageAgent, RunOutcome, RunStatus};
pub use pipeline::{BuildReport, build_page};
pub use prompt::system_prompt;
pub use protocol::{Intent, IntentParser, TextActionParser, ToolInvocation};
