//! Export module for the expense tracker
//!
//! CSV is the only export format: one row per expense, spreadsheet-compatible.

pub mod csv;

pub use self::csv::{export_expenses_csv, export_to_path, CSV_HEADER};
