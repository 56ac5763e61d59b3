//! Event logger for the append-only event log
//!
//! Each entry is written as a single JSON line and flushed immediately.
//! The logger is an explicit handle: `main` builds one and passes it down to
//! whatever needs to record events.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{TrackerError, TrackerResult};

use super::entry::{Event, LogEntry};

/// Handles writing entries to the event log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one entry.
#[derive(Debug, Clone)]
pub struct EventLogger {
    /// Path to the log file; `None` discards every entry
    log_path: Option<PathBuf>,
}

impl EventLogger {
    /// Create a new EventLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path: Some(log_path),
        }
    }

    /// A logger that writes nothing
    pub fn disabled() -> Self {
        Self { log_path: None }
    }

    /// Append an entry to the log file
    pub fn log(&self, entry: &LogEntry) -> TrackerResult<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TrackerError::Io(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TrackerError::Io(format!("Failed to open event log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize log entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrackerError::Io(format!("Failed to write log entry: {}", e)))?;

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush event log: {}", e)))?;

        Ok(())
    }

    /// Append an entry, ignoring failures
    ///
    /// A broken log file must never fail the command being logged.
    pub fn record(&self, entry: LogEntry) {
        let _ = self.log(&entry);
    }

    pub fn info(&self, event: Event, message: impl Into<String>) {
        self.record(LogEntry::info(event, message));
    }

    pub fn error(&self, event: Event, message: impl Into<String>) {
        self.record(LogEntry::error(event, message));
    }

    /// Read all entries from the log file, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<LogEntry>> {
        let Some(path) = &self.log_path else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)
            .map_err(|e| TrackerError::Io(format!("Failed to open event log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                TrackerError::Io(format!("Failed to read event log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse log entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }
}
