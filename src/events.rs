//! Observability hook for model mutations.
//!
//! The core never logs or performs I/O on its own; instead, callers inject
//! an [`EventSink`] and the model reports successful mutations to it. The
//! default sink discards everything, which keeps tests quiet.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Mutex;

/// A single timestamped record of a model mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    timestamp: DateTime<Utc>,
    description: String,
}

impl Event {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            description: description.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.to_rfc3339(), self.description)
    }
}

/// Receiver for mutation events.
///
/// Implementations must tolerate being called from storage code running on
/// an async executor, hence the `Send + Sync` bound.
pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

/// Sink that drops every event. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: Event) {}
}

/// Sink that keeps every event in memory, mainly for tests and the
/// console session's exit dump.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("event sink poisoned").clone()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: Event) {
        self.events.lock().expect("event sink poisoned").push(event);
    }
}
