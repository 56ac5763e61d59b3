//! CLI commands for reading the store
//!
//! `list`, `summary` and `export` share the same filter parsing; `export`
//! takes every `list` flag plus an output path.

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::export::export_to_path;
use crate::logging::{Event, EventLogger};
use crate::models::{normalize_category, parse_date, parse_positive_amount, YearMonth};
use crate::services::{ExpenseService, ListFilter, SortKey, SummaryFilter};
use crate::storage::Storage;

/// Filter and sort flags shared by `list` and `export`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only expenses in this month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,

    /// Only expenses in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum amount (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<String>,

    /// Maximum amount (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<String>,

    /// Sort field, defaults to the configured sort
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Show at most this many expenses
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<String>,
}

impl ListArgs {
    /// Validate the flags and build a filter
    pub fn to_filter(&self, settings: &Settings) -> TrackerResult<ListFilter> {
        let mut filter = ListFilter::new().sort(
            self.sort.unwrap_or(settings.default_sort),
            self.desc,
        );

        if let Some(month) = &self.month {
            filter = filter.month(YearMonth::parse(month)?);
        }
        if let Some(category) = &self.category {
            filter = filter.category(normalize_category(category));
        }

        let min = self.min.as_deref().map(parse_positive_amount).transpose()?;
        let max = self.max.as_deref().map(parse_positive_amount).transpose()?;
        filter = filter.amount_range(min, max);

        if let Some(limit) = &self.limit {
            filter = filter.limit(parse_limit(limit)?);
        }

        Ok(filter)
    }
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Only expenses in this month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,

    /// Only expenses in this category
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output CSV path, defaults to data/expenses.csv in the data directory
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub filter: ListArgs,
}

/// Handle `list`
pub fn handle_list(
    storage: &Storage,
    logger: &EventLogger,
    settings: &Settings,
    args: ListArgs,
) -> TrackerResult<()> {
    let filter = args.to_filter(settings)?;
    let service = ExpenseService::new(storage, logger);
    let expenses = service.list(&filter)?;

    println!("{}", format_expense_list(&expenses));
    Ok(())
}

/// Handle `summary`
pub fn handle_summary(
    storage: &Storage,
    logger: &EventLogger,
    settings: &Settings,
    args: SummaryArgs,
) -> TrackerResult<()> {
    let mut filter = SummaryFilter::new();
    if let Some(month) = &args.month {
        filter = filter.month(YearMonth::parse(month)?);
    }
    let from = args.from.as_deref().map(parse_date).transpose()?;
    let to = args.to.as_deref().map(parse_date).transpose()?;
    filter = filter.date_range(from, to);
    if let Some(category) = &args.category {
        filter = filter.category(normalize_category(category));
    }

    let service = ExpenseService::new(storage, logger);
    let summary = service.summarize(&filter)?;

    let output = format_summary(&summary, &settings.default_currency);
    println!("{}", output.trim_end());
    Ok(())
}

/// Handle `export`
pub fn handle_export(
    storage: &Storage,
    logger: &EventLogger,
    settings: &Settings,
    args: ExportArgs,
) -> TrackerResult<()> {
    let filter = args.filter.to_filter(settings)?;
    let path = args
        .path
        .unwrap_or_else(|| storage.paths().default_export_file());

    let service = ExpenseService::new(storage, logger);
    let expenses = service.list(&filter)?;
    let count = export_to_path(&expenses, &path)?;

    let message = format!("Exported {} expense(s) to {}", count, path.display());
    logger.info(Event::Exported, message.as_str());
    println!("{}", message);
    Ok(())
}

/// Parse a `--limit` value, which must be a positive integer
fn parse_limit(s: &str) -> TrackerResult<usize> {
    let limit: i64 = s
        .trim()
        .parse()
        .map_err(|_| TrackerError::Validation("limit must be an integer".into()))?;

    if limit <= 0 {
        return Err(TrackerError::Validation("limit must be > 0".into()));
    }
    usize::try_from(limit).map_err(|_| TrackerError::Validation("limit must be an integer".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("3").unwrap(), 3);
        assert_eq!(
            parse_limit("abc").unwrap_err().to_string(),
            "limit must be an integer"
        );
        assert_eq!(parse_limit("0").unwrap_err().to_string(), "limit must be > 0");
        assert_eq!(parse_limit("-2").unwrap_err().to_string(), "limit must be > 0");
    }

    #[test]
    fn test_list_args_build_filter() {
        let args = ListArgs {
            month: Some("2024-01".into()),
            category: Some(" Food ".into()),
            min: Some("5".into()),
            max: Some("50".into()),
            sort: Some(SortKey::Amount),
            desc: true,
            limit: Some("2".into()),
        };
        let filter = args.to_filter(&Settings::default()).unwrap();

        assert_eq!(filter.month, Some(YearMonth::parse("2024-01").unwrap()));
        assert_eq!(filter.category.as_deref(), Some("food"));
        assert_eq!(filter.min_amount, Some(5.0));
        assert_eq!(filter.max_amount, Some(50.0));
        assert_eq!(filter.sort, SortKey::Amount);
        assert!(filter.descending);
        assert_eq!(filter.limit, Some(2));
    }

    #[test]
    fn test_list_args_fall_back_to_settings_sort() {
        let settings = Settings {
            default_sort: SortKey::Created,
            ..Settings::default()
        };
        let filter = ListArgs::default().to_filter(&settings).unwrap();
        assert_eq!(filter.sort, SortKey::Created);
        assert!(filter.limit.is_none());
    }

    #[test]
    fn test_list_args_reject_bad_input() {
        let bad_month = ListArgs {
            month: Some("2024-1".into()),
            ..ListArgs::default()
        };
        assert_eq!(
            bad_month.to_filter(&Settings::default()).unwrap_err().to_string(),
            "month must be YYYY-MM"
        );

        let bad_min = ListArgs {
            min: Some("lots".into()),
            ..ListArgs::default()
        };
        assert_eq!(
            bad_min.to_filter(&Settings::default()).unwrap_err().to_string(),
            "amount must be a number"
        );
    }
}
