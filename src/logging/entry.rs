//! Event log entry data structures
//!
//! Defines the severity levels, the kinds of events the tracker records,
//! and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A command was invoked
    Command,
    /// Command-line arguments could not be parsed
    ArgumentError,
    /// User input was rejected
    ValidationFailure,
    /// delete/edit target does not exist
    NotFound,
    /// The data file could not be read or written
    StoreFailure,
    /// A command failed for another reason (settings, export target)
    CommandFailure,
    /// An expense was added
    Added,
    /// An expense was edited
    Updated,
    /// An expense was deleted
    Deleted,
    /// Expenses were exported to CSV
    Exported,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Event::Command => "command",
            Event::ArgumentError => "argument_error",
            Event::ValidationFailure => "validation_failure",
            Event::NotFound => "not_found",
            Event::StoreFailure => "store_failure",
            Event::CommandFailure => "command_failure",
            Event::Added => "added",
            Event::Updated => "updated",
            Event::Deleted => "deleted",
            Event::Exported => "exported",
        };
        f.write_str(name)
    }
}

/// A single event log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub level: Level,

    pub event: Event,

    /// Human-readable description
    pub message: String,

    /// Expense the event concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<String>,

    /// Field-level change summary for edits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl LogEntry {
    pub fn new(level: Level, event: Event, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            event,
            message: message.into(),
            expense_id: None,
            changes: None,
        }
    }

    pub fn info(event: Event, message: impl Into<String>) -> Self {
        Self::new(Level::Info, event, message)
    }

    pub fn warn(event: Event, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, event, message)
    }

    pub fn error(event: Event, message: impl Into<String>) -> Self {
        Self::new(Level::Error, event, message)
    }

    /// Attach the id of the expense this entry is about
    pub fn with_expense(mut self, id: impl Into<String>) -> Self {
        self.expense_id = Some(id.into());
        self
    }

    /// Attach a change summary
    pub fn with_changes(mut self, changes: Option<String>) -> Self {
        self.changes = changes;
        self
    }
}
