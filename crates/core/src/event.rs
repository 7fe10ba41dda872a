//! Domain events — progress reporting for page builds.
//!
//! The build loop and the pipeline publish events as a build progresses;
//! a front end subscribes to show progress. Publishers never wait on
//! listeners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything a page build reports while it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A build loop started for a query
    BuildStarted {
        conversation_id: String,
        query_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// The model answered one loop turn
    ResponseGenerated {
        conversation_id: String,
        model: String,
        iteration: usize,
        timestamp: DateTime<Utc>,
    },

    /// The loop dispatched a content tool
    ToolExecuted {
        tool_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A page script was written
    PageSaved {
        page_name: String,
        path: String,
        timestamp: DateTime<Utc>,
    },

    ErrorOccurred {
        context: String,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Short stable label, matching the serialized `event` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BuildStarted { .. } => "build_started",
            Self::ResponseGenerated { .. } => "response_generated",
            Self::ToolExecuted { .. } => "tool_executed",
            Self::PageSaved { .. } => "page_saved",
            Self::ErrorOccurred { .. } => "error_occurred",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::BuildStarted { timestamp, .. }
            | Self::ResponseGenerated { timestamp, .. }
            | Self::ToolExecuted { timestamp, .. }
            | Self::PageSaved { timestamp, .. }
            | Self::ErrorOccurred { timestamp, .. } => *timestamp,
        }
    }
}

/// Fan-out of [`DomainEvent`]s over `tokio::sync::broadcast`.
///
/// Slow subscribers lag and lose old events; they never block a build.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: DomainEvent) {
        // Nobody listening is fine
        let _ = self.sender.send(Arc::new(event));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
