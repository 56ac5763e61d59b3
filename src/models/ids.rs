//! Expense identifiers
//!
//! Ids look like `EXP-20240101-0001`: a fixed prefix, the expense date without
//! separators, and a four-digit sequence number scoped to that date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TrackerError;

/// Identifier of a single expense record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// The shared prefix of every id generated for `date`
    fn prefix_for(date: NaiveDate) -> String {
        format!("EXP-{}-", date.format("%Y%m%d"))
    }

    /// Generate the next free id for `date`
    ///
    /// The sequence number is one past the highest suffix used for `date`
    /// anywhere in `existing`. Fails when that suffix is already `u64::MAX`.
    pub fn generate<'a, I>(existing: I, date: NaiveDate) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = &'a ExpenseId>,
    {
        let prefix = Self::prefix_for(date);
        let next = match existing
            .into_iter()
            .filter_map(|id| id.sequence_for(&prefix))
            .max()
        {
            Some(highest) => highest.checked_add(1).ok_or_else(|| {
                TrackerError::Validation(format!("no free expense id left for {}", date))
            })?,
            None => 1,
        };

        Ok(Self(format!("{}{:04}", prefix, next)))
    }

    /// Sequence number of this id if it belongs to `prefix`
    fn sequence_for(&self, prefix: &str) -> Option<u64> {
        self.0.strip_prefix(prefix)?.parse().ok()
    }

    /// Borrow the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_id_for_date() {
        let id = ExpenseId::generate(&Vec::<ExpenseId>::new(), date(2024, 1, 1)).unwrap();
        assert_eq!(id.as_str(), "EXP-20240101-0001");
    }

    #[test]
    fn test_sequence_uses_highest_suffix_not_last() {
        let existing: Vec<ExpenseId> = vec![
            "EXP-20240101-0003".into(),
            "EXP-20240215-0007".into(),
            "EXP-20240101-0001".into(),
        ];

        let id = ExpenseId::generate(&existing, date(2024, 1, 1)).unwrap();
        assert_eq!(id.as_str(), "EXP-20240101-0004");
    }

    #[test]
    fn test_other_dates_do_not_count() {
        let existing: Vec<ExpenseId> = vec!["EXP-20240102-0009".into()];

        let id = ExpenseId::generate(&existing, date(2024, 1, 1)).unwrap();
        assert_eq!(id.as_str(), "EXP-20240101-0001");
    }

    #[test]
    fn test_unparsable_suffix_ignored() {
        let existing: Vec<ExpenseId> = vec!["EXP-20240101-abcd".into(), "legacy".into()];

        let id = ExpenseId::generate(&existing, date(2024, 1, 1)).unwrap();
        assert_eq!(id.as_str(), "EXP-20240101-0001");
    }

    #[test]
    fn test_large_suffixes_keep_counting() {
        let existing: Vec<ExpenseId> = vec!["EXP-20240101-4294967295".into()];

        let id = ExpenseId::generate(&existing, date(2024, 1, 1)).unwrap();
        assert_eq!(id.as_str(), "EXP-20240101-4294967296");
    }

    #[test]
    fn test_exhausted_sequence_is_an_error() {
        let existing: Vec<ExpenseId> = vec![format!("EXP-20240101-{}", u64::MAX).into()];

        let err = ExpenseId::generate(&existing, date(2024, 1, 1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ExpenseId::from("EXP-20240101-0001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"EXP-20240101-0001\"");
    }
}
