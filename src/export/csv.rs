//! CSV Export functionality
//!
//! Writes expenses to CSV with a fixed header row. Amounts always carry two
//! decimals; fields that need quoting are quoted by the writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{format_decimal, Expense};

/// Column order of the exported file
pub const CSV_HEADER: [&str; 7] = [
    "id",
    "date",
    "category",
    "amount",
    "currency",
    "note",
    "created_at",
];

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Export expenses to CSV, in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> TrackerResult<()> {
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    out.write_record(CSV_HEADER).map_err(export_error)?;

    for expense in expenses {
        let date = expense.date.to_string();
        let amount = format_decimal(expense.amount);
        let created_at = expense.created_at.format(CREATED_AT_FORMAT).to_string();
        out.write_record([
            expense.id.as_str(),
            date.as_str(),
            expense.category.as_str(),
            amount.as_str(),
            expense.currency.as_str(),
            expense.note.as_str(),
            created_at.as_str(),
        ])
        .map_err(export_error)?;
    }

    out.flush()
        .map_err(|e| TrackerError::Export(format!("Failed to flush CSV output: {}", e)))
}

/// Export expenses to a file, creating parent directories as needed
///
/// Returns the number of rows written (not counting the header).
pub fn export_to_path(expenses: &[Expense], path: &Path) -> TrackerResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| TrackerError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    export_expenses_csv(expenses, file)?;

    Ok(expenses.len())
}

fn export_error(e: csv::Error) -> TrackerError {
    TrackerError::Export(e.to_string())
}
