//! Calendar dates and months as the tracker reads them from the command line
//!
//! Dates are always `YYYY-MM-DD` and months `YYYY-MM`, zero-padded, so the
//! stored text sorts the same way the calendar does.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::TrackerError;

/// Format used for every date the tracker reads or writes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict, zero-padded `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, TrackerError> {
    let invalid = || TrackerError::Validation("date must be YYYY-MM-DD".into());

    if !is_padded(s, 10) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn is_padded(s: &str, len: usize) -> bool {
    s.len() == len
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// A calendar month, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Parse a strict `YYYY-MM` month
    pub fn parse(s: &str) -> Result<Self, TrackerError> {
        let invalid = || TrackerError::Validation("month must be YYYY-MM".into());

        if !is_padded(s, 7) {
            return Err(invalid());
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), DATE_FORMAT)
            .map_err(|_| invalid())?;
        Ok(Self::of(first))
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
