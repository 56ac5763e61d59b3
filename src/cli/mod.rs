//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod report;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::logging::{Event, EventLogger, LogEntry};
use crate::storage::Storage;

pub use expense::{handle_add, handle_delete, handle_edit, AddArgs, DeleteArgs, EditArgs};
pub use report::{handle_export, handle_list, handle_summary, ExportArgs, ListArgs, SummaryArgs};

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an expense
    Add(AddArgs),
    /// List expenses
    List(ListArgs),
    /// Show totals
    Summary(SummaryArgs),
    /// Export to CSV
    Export(ExportArgs),
    /// Delete an expense
    Delete(DeleteArgs),
    /// Edit an expense
    Edit(EditArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Add(_) => "add",
            Commands::List(_) => "list",
            Commands::Summary(_) => "summary",
            Commands::Export(_) => "export",
            Commands::Delete(_) => "delete",
            Commands::Edit(_) => "edit",
        }
    }
}

/// Run one command against the store
pub fn handle_command(
    storage: &Storage,
    logger: &EventLogger,
    settings: &Settings,
    cmd: Commands,
) -> TrackerResult<()> {
    let name = cmd.name();
    let result = match cmd {
        Commands::Add(args) => handle_add(storage, logger, settings, args),
        Commands::List(args) => handle_list(storage, logger, settings, args),
        Commands::Summary(args) => handle_summary(storage, logger, settings, args),
        Commands::Export(args) => handle_export(storage, logger, settings, args),
        Commands::Delete(args) => handle_delete(storage, logger, args),
        Commands::Edit(args) => handle_edit(storage, logger, args),
    };

    if let Err(e) = &result {
        log_failure(logger, name, e);
    }
    result
}

/// Record a failed command in the event log
///
/// Bad input and missing targets are warnings. Store failures and every other
/// failure are errors under separate events.
pub fn log_failure(logger: &EventLogger, command: &str, err: &TrackerError) {
    let entry = match err {
        TrackerError::Validation(msg) => LogEntry::warn(
            Event::ValidationFailure,
            format!("Validation failure on {}: {}", command, msg),
        ),
        TrackerError::NotFound { identifier, .. } => LogEntry::warn(
            Event::NotFound,
            format!("{} failed: {} not found", command, identifier),
        )
        .with_expense(identifier.as_str()),
        e if e.is_store_failure() => LogEntry::error(
            Event::StoreFailure,
            format!("{} failed: {}", command, e),
        ),
        other => LogEntry::error(
            Event::CommandFailure,
            format!("{} failed: {}", command, other),
        ),
    };
    logger.record(entry);
}
