use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::calculations::SalaryError;
use crate::calculations::salary::validate_amount;

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses user-entered text into a salary amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty,
/// non-numeric and negative input is rejected with
/// [`SalaryError::InvalidInput`] and logged at debug level; reporting the
/// error to the user is left to the caller.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::utils::parse_amount;
///
/// assert_eq!(parse_amount(" 12,500.75 ").unwrap(), dec!(12500.75));
/// assert!(parse_amount("-1").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, SalaryError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        tracing::debug!("empty amount");
        return Err(SalaryError::InvalidInput("amount is empty".to_string()));
    }
    let amount: Decimal = normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        SalaryError::InvalidInput(format!("'{}' is not a valid amount", s.trim()))
    })?;
    validate_amount(amount).inspect_err(|e| tracing::debug!(input = %s, "{e}"))
}

/// Converts a floating-point amount, rejecting NaN, infinities and negatives.
pub fn amount_from_f64(value: f64) -> Result<Decimal, SalaryError> {
    let amount = Decimal::from_f64(value)
        .ok_or_else(|| SalaryError::InvalidInput(format!("{value} is not a finite amount")))?;
    validate_amount(amount)
}
