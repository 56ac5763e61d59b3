//! Expense display formatting
//!
//! Formats expenses and summaries for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, Expense};
use crate::services::Summary;

#[derive(Tabled)]
struct ExpenseRow<'a> {
    id: &'a str,
    date: String,
    category: &'a str,
    amount: String,
    note: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.as_str(),
            date: expense.date.to_string(),
            category: &expense.category,
            amount: format_amount(expense.amount, &expense.currency),
            note: &expense.note,
        }
    }
}

/// Format a list of expenses as an aligned table
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<ExpenseRow<'_>> = expenses.iter().map(ExpenseRow::from).collect();
    Table::new(rows).with(Style::blank()).to_string()
}

/// Format a single expense on one line, prefixed with `label`
pub fn format_expense_line(label: &str, expense: &Expense) -> String {
    format!("{}: {}", label, expense)
}

/// Format summary totals
///
/// `currency` labels the grand total and every subtotal.
pub fn format_summary(summary: &Summary, currency: &str) -> String {
    let Some(aggregates) = &summary.aggregates else {
        return "No expenses to summarize.".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!("Total Expenses: {}\n", aggregates.count));
    output.push_str(&format!(
        "Grand Total: {}\n",
        format_amount(aggregates.total, currency)
    ));

    output.push_str("\nBy category:\n");
    for (category, total) in &aggregates.by_category {
        output.push_str(&format!("- {}: {}\n", category, format_amount(*total, currency)));
    }

    output.push_str("\nBy month:\n");
    for (month, total) in &aggregates.by_month {
        output.push_str(&format!("- {}: {}\n", month, format_amount(*total, currency)));
    }

    output
}
