//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and summaries for terminal
//! display.

pub mod expense;

pub use expense::{format_expense_line, format_expense_list, format_summary};
