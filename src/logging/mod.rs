//! Event logging for the expense tracker
//!
//! Records command invocations, rejected input, store failures and every
//! change to the data file in an append-only JSONL log.
//!
//! # Architecture
//!
//! - `LogEntry`: a single entry with timestamp, level, event kind, message,
//!   and optional expense id and change summary.
//! - `EventLogger`: the handle that appends entries to the log file. There is
//!   no global logger; callers receive a reference to one.
//! - `generate_diff`: builds the change summary for edited expenses.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::logging::{Event, EventLogger, LogEntry};
//!
//! let logger = EventLogger::new(paths.log_file());
//! logger.info(Event::Command, "list --month 2024-01");
//! logger.record(LogEntry::info(Event::Added, "Added expense").with_expense(&id));
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{Event, Level, LogEntry};
pub use logger::EventLogger;
