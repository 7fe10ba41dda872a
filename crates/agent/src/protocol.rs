//! The action protocol — how the model asks for a tool in plain text.
//!
//! Version 1 of the protocol is line based:
//!
//! ```text
//! Thought: I should add an essay about space.
//! Action: essay_writer: The history of space exploration
//! PAUSE
//! ```
//!
//! - A reply that contains both `PAUSE` and `Action` requests a tool. The
//!   first `Action: <name>: <argument>` match is used; the argument runs to
//!   the end of its line. Matching is case-insensitive.
//! - A reply that contains `Answer` ends the build.
//! - Anything else is a turn with no effect.
//!
//! The loop only ever sees an [`Intent`], so a stricter format can be
//! swapped in through [`IntentParser`] without touching it.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Version of the text grammar implemented by [`TextActionParser`].
pub const PROTOCOL_VERSION: u32 = 1;

pub const PAUSE_MARKER: &str = "PAUSE";
pub const ACTION_MARKER: &str = "Action";
pub const ANSWER_MARKER: &str = "Answer";

static ACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Action: ([a-z_]+): (.+)").expect("action pattern is a valid regex")
});

/// A tool request parsed from one reply. Not retained after dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool: String,
    pub argument: String,
}

/// What one model reply asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Dispatch a tool and feed back an observation.
    ActionFound(ToolInvocation),
    /// The model declared the page finished.
    Answered,
    /// Neither; go round again.
    Continue,
}

/// Turns a raw model reply into an [`Intent`].
pub trait IntentParser: Send + Sync {
    fn classify(&self, reply: &str) -> Intent;
}

/// The `Action:` / `PAUSE` / `Answer` text grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextActionParser;

impl IntentParser for TextActionParser {
    fn classify(&self, reply: &str) -> Intent {
        classify(reply)
    }
}

/// Extract the first `Action: <tool>: <argument>` from a reply.
pub fn parse_action(reply: &str) -> Option<ToolInvocation> {
    let caps = ACTION_LINE.captures(reply)?;
    let tool = caps.get(1)?.as_str().to_string();
    let argument = caps.get(2)?.as_str().trim_end().to_string();
    Some(ToolInvocation { tool, argument })
}

/// Classify a reply under protocol version 1.
///
/// A reply with `PAUSE` and `Action` but no well-formed action line falls
/// through to the `Answer` check.
pub fn classify(reply: &str) -> Intent {
    if reply.contains(PAUSE_MARKER) && reply.contains(ACTION_MARKER) {
        if let Some(invocation) = parse_action(reply) {
            return Intent::ActionFound(invocation);
        }
    }
    if reply.contains(ANSWER_MARKER) {
        return Intent::Answered;
    }
    Intent::Continue
}

/// Observation fed back after a tool ran.
pub fn observation_added(tool: &str) -> String {
    format!("Observation: {tool} added")
}

/// Observation fed back when the requested tool does not exist.
pub const OBSERVATION_TOOL_NOT_FOUND: &str = "Observation: Tool not found";
