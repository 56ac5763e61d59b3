//! Amount parsing and formatting
//!
//! Amounts are kept as plain `f64` values so the data file stores them as
//! JSON numbers; these helpers are the single place user input becomes an
//! amount and an amount becomes display text.

use crate::error::TrackerError;

/// Parse a user-supplied amount, which must be a finite number above zero
///
/// # Examples
/// ```
/// use expense_tracker::models::parse_positive_amount;
/// assert_eq!(parse_positive_amount("12.5").unwrap(), 12.5);
/// assert!(parse_positive_amount("0").is_err());
/// ```
pub fn parse_positive_amount(s: &str) -> Result<f64, TrackerError> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|_| TrackerError::Validation("amount must be a number".into()))?;

    if !amount.is_finite() {
        return Err(TrackerError::Validation("amount must be a number".into()));
    }
    if amount <= 0.0 {
        return Err(TrackerError::Validation("amount must be > 0".into()));
    }

    Ok(amount)
}

/// Format an amount with exactly two decimal places
pub fn format_decimal(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format an amount followed by its currency code, e.g. `12.50 BDT`
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}
