//! Gross/net salary calculator.
//!
//! # Forward calculation
//!
//! Income is split across the schedule's bands in ascending order; each band
//! is taxed only on the portion of income that falls inside it. Pension is a
//! flat share of gross and does not depend on the bands.
//!
//! # Reverse calculation
//!
//! There is no closed-form inverse across band edges, so the gross salary for
//! a target net is found by bisection on `[0, high]`, where
//!
//! ```text
//! high = net / (1 - max_marginal_rate - pension_rate)
//! ```
//!
//! Every unit of gross loses at most `max_marginal_rate + pension_rate` to
//! deductions, so `net(g) >= g * (1 - max_marginal_rate - pension_rate)` and
//! the matching gross can never lie above `high`. The search stops once the
//! interval is no wider than [`SEARCH_PRECISION`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{SalaryCalculator, TaxSchedule};
//!
//! let calculator = SalaryCalculator::new(TaxSchedule::standard());
//!
//! let forward = calculator.compute_from_gross(dec!(5000)).unwrap();
//! assert_eq!(forward.net_salary, dec!(3952.5));
//!
//! let reverse = calculator.compute_from_net(dec!(3952.5)).unwrap();
//! assert!((reverse.gross_salary - dec!(5000)).abs() <= dec!(0.02));
//! ```

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::common::midpoint;
use crate::utils::amount_from_f64;
use crate::{SalaryResult, TaxSchedule};

/// Width of the gross-salary interval at which the reverse search stops.
pub const SEARCH_PRECISION: Decimal = dec!(0.01);

/// Largest amount accepted by the calculator (10^15).
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Errors that can occur during salary calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalaryError {
    /// The amount is negative, not a finite number, unparseable or too large.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Tax owed on the part of gross salary that falls inside one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Computes salary results against a borrowed [`TaxSchedule`].
#[derive(Debug, Clone, Copy)]
pub struct SalaryCalculator<'a> {
    schedule: &'a TaxSchedule,
}

/// Forward calculation against [`TaxSchedule::standard`].
pub fn compute_from_gross(gross: Decimal) -> Result<SalaryResult, SalaryError> {
    SalaryCalculator::standard().compute_from_gross(gross)
}

/// Reverse calculation against [`TaxSchedule::standard`].
pub fn compute_from_net(target_net: Decimal) -> Result<SalaryResult, SalaryError> {
    SalaryCalculator::standard().compute_from_net(target_net)
}

impl SalaryCalculator<'static> {
    pub fn standard() -> Self {
        Self::new(TaxSchedule::standard())
    }
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a TaxSchedule {
        self.schedule
    }

    /// Computes income tax, pension and net salary for a gross salary.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryError::InvalidInput`] if `gross` is negative or above
    /// [`MAX_AMOUNT`].
    pub fn compute_from_gross(
        &self,
        gross: Decimal,
    ) -> Result<SalaryResult, SalaryError> {
        let gross = validate_amount(gross)?;
        Ok(self.evaluate(gross))
    }

    /// Finds the gross salary whose net salary matches `target_net`.
    ///
    /// The returned gross is within half of [`SEARCH_PRECISION`] of the exact
    /// answer, and the other fields are computed from that gross. The bound
    /// holds for every schedule accepted by [`TaxSchedule::new`], since
    /// [`crate::MIN_KEPT_SHARE`] keeps the search interval below 10^17.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryError::InvalidInput`] if `target_net` is negative or
    /// above [`MAX_AMOUNT`].
    pub fn compute_from_net(
        &self,
        target_net: Decimal,
    ) -> Result<SalaryResult, SalaryError> {
        let target_net = validate_amount(target_net)?;

        let mut low = Decimal::ZERO;
        let mut high = self.gross_upper_bound(target_net)?;
        let mut mid = midpoint(low, high);
        let mut result = self.evaluate(mid);
        let mut iterations = 0u32;

        while high - low > SEARCH_PRECISION {
            match result.net_salary.cmp(&target_net) {
                Ordering::Greater => high = mid,
                Ordering::Less => low = mid,
                Ordering::Equal => break,
            }
            mid = midpoint(low, high);
            result = self.evaluate(mid);
            iterations += 1;
            trace!(%low, %high, %mid, net = %result.net_salary, "bisection step");
        }

        debug!(%target_net, gross = %mid, iterations, "resolved gross salary");
        Ok(result)
    }

    /// Splits the income tax on `gross` into per-band amounts.
    ///
    /// Bands that receive no income are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryError::InvalidInput`] under the same conditions as
    /// [`Self::compute_from_gross`].
    pub fn tax_breakdown(
        &self,
        gross: Decimal,
    ) -> Result<Vec<BandTax>, SalaryError> {
        let gross = validate_amount(gross)?;
        Ok(self.band_taxes(gross))
    }

    fn evaluate(
        &self,
        gross: Decimal,
    ) -> SalaryResult {
        let income_tax = self.income_tax(gross);
        let pension_contribution = self.pension_contribution(gross);

        SalaryResult {
            gross_salary: gross,
            income_tax,
            pension_contribution,
            net_salary: gross - income_tax - pension_contribution,
        }
    }

    fn income_tax(
        &self,
        gross: Decimal,
    ) -> Decimal {
        self.band_taxes(gross).iter().map(|band| band.tax).sum()
    }

    fn pension_contribution(
        &self,
        gross: Decimal,
    ) -> Decimal {
        gross * self.schedule.pension_rate()
    }

    fn band_taxes(
        &self,
        gross: Decimal,
    ) -> Vec<BandTax> {
        let mut remaining = gross;
        let mut bands = Vec::new();

        for (lower, upper, rate) in self.schedule.bands() {
            if remaining <= Decimal::ZERO {
                break;
            }
            let taxable = match upper {
                Some(upper) => remaining.min(upper - lower),
                None => remaining,
            };
            bands.push(BandTax {
                lower,
                upper,
                rate,
                taxable,
                tax: taxable * rate,
            });
            remaining -= taxable;
        }

        bands
    }

    /// Upper edge of the reverse search interval for `target_net`.
    fn gross_upper_bound(
        &self,
        target_net: Decimal,
    ) -> Result<Decimal, SalaryError> {
        let kept_per_unit =
            Decimal::ONE - self.schedule.max_marginal_rate() - self.schedule.pension_rate();
        target_net.checked_div(kept_per_unit).ok_or_else(|| {
            SalaryError::InvalidInput(format!(
                "net salary {target_net} is out of range for this schedule"
            ))
        })
    }
}

/// Checks that `amount` is a non-negative value no larger than [`MAX_AMOUNT`].
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, SalaryError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SalaryError::InvalidInput(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(SalaryError::InvalidInput(format!(
            "amount {amount} exceeds the maximum of {MAX_AMOUNT}"
        )));
    }
    Ok(amount.abs())
}

impl TryFrom<f64> for SalaryResult {
    type Error = SalaryError;

    /// Forward calculation from a floating-point gross salary.
    fn try_from(gross: f64) -> Result<Self, Self::Error> {
        compute_from_gross(amount_from_f64(gross)?)
    }
}
