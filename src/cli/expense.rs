//! Expense CLI commands
//!
//! Implements the commands that change the store: add, edit and delete.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_expense_line;
use crate::error::{TrackerError, TrackerResult};
use crate::logging::EventLogger;
use crate::models::{parse_date, parse_positive_amount, today, ExpenseId};
use crate::services::{ExpenseChanges, ExpenseService, NewExpense};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Category name
    #[arg(long)]
    pub category: String,

    /// Amount, must be greater than zero
    #[arg(long, allow_negative_numbers = true)]
    pub amount: String,

    /// Free-text note
    #[arg(long, default_value = "")]
    pub note: String,

    /// Currency code, defaults to the configured currency
    #[arg(long)]
    pub currency: Option<String>,
}

/// Arguments for `edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Expense ID
    #[arg(long)]
    pub id: String,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New amount
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Option<String>,

    /// New note (an empty string clears it)
    #[arg(long)]
    pub note: Option<String>,

    /// New currency code
    #[arg(long)]
    pub currency: Option<String>,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Expense ID
    #[arg(long)]
    pub id: String,
}

/// Handle `add`
pub fn handle_add(
    storage: &Storage,
    logger: &EventLogger,
    settings: &Settings,
    args: AddArgs,
) -> TrackerResult<()> {
    let date = match args.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    if args.category.trim().is_empty() {
        return Err(TrackerError::Validation("category is required".into()));
    }
    let amount = parse_positive_amount(&args.amount)?;

    let service = ExpenseService::new(storage, logger);
    let expense = service.add(NewExpense {
        date,
        category: args.category,
        amount,
        currency: args
            .currency
            .unwrap_or_else(|| settings.default_currency.clone()),
        note: args.note,
    })?;

    println!("{}", format_expense_line("Added", &expense));
    Ok(())
}

/// Handle `edit`
pub fn handle_edit(storage: &Storage, logger: &EventLogger, args: EditArgs) -> TrackerResult<()> {
    if args.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err(TrackerError::Validation("category is required".into()));
    }

    let changes = ExpenseChanges {
        date: args.date.as_deref().map(parse_date).transpose()?,
        category: args.category,
        amount: args
            .amount
            .as_deref()
            .map(parse_positive_amount)
            .transpose()?,
        note: args.note,
        currency: args.currency,
    };

    let service = ExpenseService::new(storage, logger);
    let expense = service.edit(&ExpenseId::from(args.id), changes)?;

    println!("{}", format_expense_line("Updated", &expense));
    Ok(())
}

/// Handle `delete`
pub fn handle_delete(
    storage: &Storage,
    logger: &EventLogger,
    args: DeleteArgs,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage, logger);
    let removed = service.delete(&ExpenseId::from(args.id))?;

    println!("Deleted: {}", removed.id);
    Ok(())
}
