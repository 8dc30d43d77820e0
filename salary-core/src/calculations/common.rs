//! Rounding and formatting helpers shared by the salary calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary amount with exactly two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(350)), "350.00");
/// assert_eq!(format_amount(dec!(3952.5)), "3952.50");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a rate in `[0, 1]` as a percentage, e.g. `0.075` as `7.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Midpoint of a search interval.
pub(crate) fn midpoint(
    low: Decimal,
    high: Decimal,
) -> Decimal {
    (low + high) / Decimal::TWO
}
