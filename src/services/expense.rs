//! Expense service
//!
//! Provides the operations behind every command. Each call loads the store
//! fresh, works on the in-memory copy, and saves the whole store back only
//! when something changed.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::logging::{generate_diff, Event, EventLogger, LogEntry};
use crate::models::{normalize_category, Expense, ExpenseId};
use crate::storage::Storage;

use super::query::{ListFilter, Summary, SummaryFilter};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    logger: &'a EventLogger,
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub note: String,
}

/// Fields to change on an existing expense; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub note: Option<String>,
    pub currency: Option<String>,
}

impl ExpenseChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.note.is_none()
            && self.currency.is_none()
    }

    fn apply_to(self, expense: &mut Expense) {
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(category) = self.category {
            expense.category = normalize_category(&category);
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(note) = self.note {
            expense.note = note;
        }
        if let Some(currency) = self.currency {
            expense.currency = currency;
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, logger: &'a EventLogger) -> Self {
        Self { storage, logger }
    }

    /// Record a new expense
    ///
    /// The category is stored trimmed and lowercase. The id is the next free
    /// sequence number for the expense date.
    pub fn add(&self, input: NewExpense) -> TrackerResult<Expense> {
        let mut store = self.storage.expenses.load()?;

        let id = store.next_id(input.date)?;
        let expense = Expense::new(
            id,
            input.date,
            normalize_category(&input.category),
            input.amount,
            input.currency,
            input.note,
        );
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        store.expenses.push(expense.clone());
        self.storage.expenses.save(&store)?;

        self.logger.record(
            LogEntry::info(Event::Added, format!("Added expense {}", expense.id))
                .with_expense(expense.id.as_str()),
        );

        Ok(expense)
    }

    /// List expenses matching `filter`, sorted and truncated as it asks
    pub fn list(&self, filter: &ListFilter) -> TrackerResult<Vec<Expense>> {
        let store = self.storage.expenses.load()?;
        Ok(filter.apply(store.expenses))
    }

    /// Filter and aggregate expenses
    pub fn summarize(&self, filter: &SummaryFilter) -> TrackerResult<Summary> {
        let store = self.storage.expenses.load()?;
        Ok(Summary::build(store.expenses, filter))
    }

    /// Change fields of an existing expense
    ///
    /// The id is kept even when the date changes.
    pub fn edit(&self, id: &ExpenseId, changes: ExpenseChanges) -> TrackerResult<Expense> {
        if changes.is_empty() {
            return Err(TrackerError::Validation(
                "At least one field is required to edit".into(),
            ));
        }

        let mut store = self.storage.expenses.load()?;
        let index = store
            .position(id)
            .ok_or_else(|| TrackerError::expense_not_found(id.as_str()))?;

        let mut updated = store.expenses[index].clone();
        let before = updated.to_value()?;
        changes.apply_to(&mut updated);
        updated
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        let after = updated.to_value()?;

        store.expenses[index] = updated.clone();
        self.storage.expenses.save(&store)?;

        self.logger.record(
            LogEntry::info(Event::Updated, format!("Edited expense {}", id))
                .with_expense(id.as_str())
                .with_changes(generate_diff(&before, &after)),
        );

        Ok(updated)
    }

    /// Remove an expense, returning what was removed
    pub fn delete(&self, id: &ExpenseId) -> TrackerResult<Expense> {
        let mut store = self.storage.expenses.load()?;
        let index = store
            .position(id)
            .ok_or_else(|| TrackerError::expense_not_found(id.as_str()))?;

        let removed = store.expenses.remove(index);
        self.storage.expenses.save(&store)?;

        self.logger.record(
            LogEntry::info(Event::Deleted, format!("Deleted expense {}", id))
                .with_expense(id.as_str()),
        );

        Ok(removed)
    }
}
