//! Money formatting and parsing in integer cents.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the system is an `i64` count of cents. Text amounts use a
//! comma as the decimal separator (`"12,50"`).

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::AppError;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(,(\d\d))?$").expect("valid regex"));

/// Error returned for amount text that is not `units` or `units,cc`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The text does not have the expected shape.
    #[error("Invalid amount: {0:?}")]
    Invalid(String),

    /// The amount does not fit in 64 bits of cents.
    #[error("Amount out of range: {0:?}")]
    OutOfRange(String),
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Formats cents as `units,cc`.
///
/// Zero and negative amounts format as the empty string: a blank cell means
/// nothing is owed.
#[must_use]
pub fn amount_from_cents(cents: i64) -> String {
    if cents <= 0 {
        return String::new();
    }
    format!("{},{:02}", cents / 100, cents % 100)
}

/// Parses `units` or `units,cc` into cents after removing all whitespace.
///
/// The empty string parses to zero.
///
/// # Errors
///
/// Returns [`AmountError`] for any other shape, e.g. `"12.50"` or `"1,5"`.
pub fn cents_from_amount(amount: &str) -> Result<i64, AmountError> {
    let amount = WHITESPACE.replace_all(amount, "");
    if amount.is_empty() {
        return Ok(0);
    }
    let caps = AMOUNT
        .captures(&amount)
        .ok_or_else(|| AmountError::Invalid(amount.to_string()))?;
    let out_of_range = || AmountError::OutOfRange(amount.to_string());
    let units: i64 = caps[1].parse().map_err(|_| out_of_range())?;
    let subunits: i64 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| out_of_range())?,
        None => 0,
    };
    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(subunits))
        .ok_or_else(out_of_range)
}
