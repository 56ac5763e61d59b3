//! Expense model
//!
//! One recorded transaction: when it happened, what it was for, and how much
//! it cost. Field order here is the key order written to the data file.

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::ids::ExpenseId;
use super::money::format_amount;

/// Currency recorded when none is given
pub const DEFAULT_CURRENCY: &str = "BDT";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, see [`ExpenseId::generate`]
    pub id: ExpenseId,

    /// Day the money was spent
    pub date: NaiveDate,

    /// Lowercase spending category
    pub category: String,

    /// Amount spent, always above zero
    pub amount: f64,

    /// Currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Free-text note
    #[serde(default)]
    pub note: String,

    /// When the record was created (local time, whole seconds)
    pub created_at: NaiveDateTime,
}

impl Expense {
    /// Create a new expense stamped with the current time
    pub fn new(
        id: ExpenseId,
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            category: category.into(),
            amount,
            currency: currency.into(),
            note: note.into(),
            created_at: Local::now().naive_local().trunc_subsecs(0),
        }
    }

    /// Build an expense from its key-value form
    ///
    /// `currency` and `note` may be absent; every other field must be present
    /// and of the right type.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Convert to the key-value form written to the data file
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Check the record invariants
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.id,
            self.date,
            self.category,
            format_amount(self.amount, &self.currency),
            self.note
        )
    }
}

/// Normalize a category the way it is stored: trimmed and lowercase
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(f64),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(_) => write!(f, "amount must be > 0"),
            Self::EmptyCategory => write!(f, "category is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
