//! Filtering, sorting and aggregation over a loaded expense collection
//!
//! Everything here is a pure function of the in-memory records; loading and
//! saving is the caller's business.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{Expense, YearMonth};

/// Field `list` sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
    /// Creation time
    Created,
    Id,
}

impl SortKey {
    fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Id => a.id.cmp(&b.id),
        }
    }
}

/// Options for `list`
///
/// Every filter that is set must match (absent filters pass everything);
/// matches are then sorted and optionally truncated.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub month: Option<YearMonth>,
    pub category: Option<String>,
    /// Inclusive lower bound on the amount
    pub min_amount: Option<f64>,
    /// Inclusive upper bound on the amount
    pub max_amount: Option<f64>,
    pub sort: SortKey,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl ListFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month
    pub fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by category (exact match)
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by amount range
    pub fn amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Sort order
    pub fn sort(mut self, key: SortKey, descending: bool) -> Self {
        self.sort = key;
        self.descending = descending;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a single expense passes every filter
    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| m.contains(expense.date))
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category == c)
            && self.min_amount.map_or(true, |min| expense.amount >= min)
            && self.max_amount.map_or(true, |max| expense.amount <= max)
    }

    /// Filter, sort and truncate
    ///
    /// The sort is stable in both directions, so ties keep collection order.
    pub fn apply(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        let mut selected: Vec<Expense> = expenses.into_iter().filter(|e| self.matches(e)).collect();

        let key = self.sort;
        if self.descending {
            selected.sort_by(|a, b| key.compare(b, a));
        } else {
            selected.sort_by(|a, b| key.compare(a, b));
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}

/// Options for `summary`
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub month: Option<YearMonth>,
    pub category: Option<String>,
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
}

impl SummaryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| m.contains(expense.date))
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category == c)
            && self.from.map_or(true, |from| expense.date >= from)
            && self.to.map_or(true, |to| expense.date <= to)
    }
}

/// Totals over a non-empty set of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub count: usize,
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    pub by_month: BTreeMap<YearMonth, f64>,
}

impl Aggregates {
    /// Aggregate a set of expenses; `None` if there is nothing to aggregate
    pub fn from_expenses(expenses: &[Expense]) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let mut total = 0.0;
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();

        for expense in expenses {
            total += expense.amount;
            *by_category.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
            *by_month.entry(YearMonth::of(expense.date)).or_insert(0.0) += expense.amount;
        }

        Some(Self {
            count: expenses.len(),
            total,
            by_category,
            by_month,
        })
    }
}

/// Result of `summarize`: the matching records plus their totals
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub expenses: Vec<Expense>,
    /// `None` when no expense matched
    pub aggregates: Option<Aggregates>,
}

impl Summary {
    /// Filter and aggregate
    pub fn build(expenses: Vec<Expense>, filter: &SummaryFilter) -> Self {
        let expenses: Vec<Expense> = expenses.into_iter().filter(|e| filter.matches(e)).collect();
        let aggregates = Aggregates::from_expenses(&expenses);
        Self {
            expenses,
            aggregates,
        }
    }
}
