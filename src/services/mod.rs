//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, id assignment, queries, and event logging.

pub mod expense;
pub mod query;

pub use expense::{ExpenseChanges, ExpenseService, NewExpense};
pub use query::{Aggregates, ListFilter, SortKey, Summary, SummaryFilter};
