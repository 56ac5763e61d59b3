//! Core data models for the expense tracker
//!
//! The expense record, its identifier, and the date, month and amount
//! helpers shared by every layer above.

pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use expense::{normalize_category, Expense, ExpenseValidationError, DEFAULT_CURRENCY};
pub use ids::ExpenseId;
pub use money::{format_amount, format_decimal, parse_positive_amount};
pub use period::{parse_date, today, YearMonth, DATE_FORMAT};
