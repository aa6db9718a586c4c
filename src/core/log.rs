//! Session event log.
//!
//! Discrete monitoring events (alerts, recoveries, state changes, lifecycle
//! messages) are appended here with a timestamp. Entries are kept newest-first
//! for display. Retention is explicitly capped so a long-running session
//! cannot grow memory without bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default retention cap for the event log.
pub const DEFAULT_LOG_CAP: usize = 1000;

/// A single logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
    /// Human-readable event description
    pub message: String,
}

/// Append-only event log, newest entries first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    cap: usize,
}

impl EventLog {
    /// Create a log with the default retention cap.
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_LOG_CAP)
    }

    /// Create a log with an explicit retention cap. A cap of 0 means
    /// unbounded retention.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
        }
    }

    /// Append a new entry, evicting the oldest if over the cap.
    ///
    /// Returns a copy of the appended entry so callers can bundle it into
    /// per-tick output.
    pub fn append(&mut self, message: impl Into<String>) -> EventLogEntry {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            message: message.into(),
        };
        self.entries.push_front(entry.clone());
        if self.cap > 0 && self.entries.len() > self.cap {
            self.entries.pop_back();
        }
        entry
    }

    /// Iterate entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all retained entries, newest-first.
    pub fn to_vec(&self) -> Vec<EventLogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Count entries whose message contains the given fragment.
    pub fn count_matching(&self, fragment: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.message.contains(fragment))
            .count()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
