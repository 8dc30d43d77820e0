//! Progressive income tax schedule and pension rate.
//!
//! The standard schedule is built once per process and shared read-only:
//!
//! | Band           | Rate |
//! |----------------|------|
//! | 0 – 600        | 0%   |
//! | 600 – 1650     | 10%  |
//! | 1650 – 3200    | 15%  |
//! | 3200 – 5250    | 20%  |
//! | 5250 – 7800    | 25%  |
//! | 7800 – 10900   | 30%  |
//! | above 10900    | 35%  |
//!
//! Pension is a flat 7% of gross salary.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::debug;

use crate::TaxBracket;

static STANDARD: OnceLock<TaxSchedule> = OnceLock::new();

/// Smallest share of each extra unit of gross that must reach net salary.
///
/// Caps the reverse-search interval at `MAX_AMOUNT / MIN_KEPT_SHARE` (10^17),
/// which leaves `Decimal` room for well over two fractional digits.
pub const MIN_KEPT_SHARE: Decimal = dec!(0.01);

/// Errors that can occur when building a [`TaxSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// No brackets were supplied.
    #[error("tax schedule has no brackets")]
    NoBrackets,

    /// A marginal rate lies outside `[0, 1]`.
    #[error("bracket {index} has rate {rate} outside 0..=1")]
    InvalidRate { index: usize, rate: Decimal },

    /// The pension rate lies outside `[0, 1]`.
    #[error("pension rate {0} outside 0..=1")]
    InvalidPensionRate(Decimal),

    /// A bracket's upper bound does not exceed its lower edge.
    #[error("bracket {index} upper bound {upper} does not exceed lower edge {lower}")]
    NonAscendingBound {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    /// An open-ended bracket appears before the last position.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedNotLast(usize),

    /// The last bracket has an upper bound, leaving income above it untaxed.
    #[error("last bracket must be unbounded")]
    BoundedLast,

    /// Highest marginal rate plus pension rate leaves less than [`MIN_KEPT_SHARE`]
    /// of the next unit earned.
    #[error("top marginal rate {top_rate} plus pension rate {pension_rate} must not exceed 0.99")]
    ConfiscatoryRate {
        top_rate: Decimal,
        pension_rate: Decimal,
    },
}

/// Ordered, contiguous set of tax brackets plus the flat pension rate.
///
/// Instances are immutable once built. Use [`TaxSchedule::standard`] for the
/// built-in schedule or [`TaxSchedule::new`] to validate a custom one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
    pension_rate: Decimal,
}

impl TaxSchedule {
    /// Builds a schedule, checking that the brackets are contiguous, ascending
    /// and end with an unbounded bracket.
    pub fn new(
        brackets: Vec<TaxBracket>,
        pension_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        validate(&brackets, pension_rate)?;
        debug!(brackets = brackets.len(), %pension_rate, "built tax schedule");
        Ok(Self {
            brackets,
            pension_rate,
        })
    }

    /// The built-in schedule, initialized on first use.
    pub fn standard() -> &'static TaxSchedule {
        STANDARD.get_or_init(|| TaxSchedule {
            brackets: vec![
                TaxBracket::bounded(Decimal::new(600, 0), Decimal::ZERO),
                TaxBracket::bounded(Decimal::new(1650, 0), Decimal::new(10, 2)),
                TaxBracket::bounded(Decimal::new(3200, 0), Decimal::new(15, 2)),
                TaxBracket::bounded(Decimal::new(5250, 0), Decimal::new(20, 2)),
                TaxBracket::bounded(Decimal::new(7800, 0), Decimal::new(25, 2)),
                TaxBracket::bounded(Decimal::new(10900, 0), Decimal::new(30, 2)),
                TaxBracket::unbounded(Decimal::new(35, 2)),
            ],
            pension_rate: Decimal::new(7, 2),
        })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn pension_rate(&self) -> Decimal {
        self.pension_rate
    }

    /// Highest marginal rate across all brackets.
    pub fn max_marginal_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Iterates `(lower, upper, rate)` for each bracket in ascending order.
    pub fn bands(&self) -> impl Iterator<Item = (Decimal, Option<Decimal>, Decimal)> + '_ {
        let lowers = std::iter::once(Decimal::ZERO).chain(
            self.brackets
                .iter()
                .map(|b| b.upper_bound.unwrap_or(Decimal::MAX)),
        );
        lowers
            .zip(self.brackets.iter())
            .map(|(lower, bracket)| (lower, bracket.upper_bound, bracket.rate))
    }
}

fn is_rate(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

fn validate(
    brackets: &[TaxBracket],
    pension_rate: Decimal,
) -> Result<(), ScheduleError> {
    let last = brackets.len().checked_sub(1).ok_or(ScheduleError::NoBrackets)?;

    if !is_rate(pension_rate) {
        return Err(ScheduleError::InvalidPensionRate(pension_rate));
    }

    let mut lower = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if !is_rate(bracket.rate) {
            return Err(ScheduleError::InvalidRate {
                index,
                rate: bracket.rate,
            });
        }
        match bracket.upper_bound {
            Some(upper) if upper <= lower => {
                return Err(ScheduleError::NonAscendingBound {
                    index,
                    lower,
                    upper,
                });
            }
            Some(_) if index == last => return Err(ScheduleError::BoundedLast),
            Some(upper) => lower = upper,
            None if index != last => return Err(ScheduleError::UnboundedNotLast(index)),
            None => {}
        }
    }

    let top_rate = brackets
        .iter()
        .map(|b| b.rate)
        .max()
        .unwrap_or(Decimal::ZERO);
    if Decimal::ONE - top_rate - pension_rate < MIN_KEPT_SHARE {
        return Err(ScheduleError::ConfiscatoryRate {
            top_rate,
            pension_rate,
        });
    }

    Ok(())
}
