//! Event log shown on the dashboard
//!
//! Newest entry first, capped at `LOG_CAPACITY`. Entries carry the session
//! clock rather than wall time so a replayed session logs identically.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::LOG_CAPACITY;
use crate::format_clock;

/// A single log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Session time in seconds
    pub at: f32,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_clock(self.at), self.message)
    }
}

/// Capped, newest-first event feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(LOG_CAPACITY + 1),
        }
    }

    /// Add an entry at the front, dropping the oldest past capacity
    pub fn push(&mut self, at: f32, message: impl Into<String>) {
        self.entries.insert(
            0,
            LogEntry {
                at,
                message: message.into(),
            },
        );
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered lines for the dashboard, newest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
