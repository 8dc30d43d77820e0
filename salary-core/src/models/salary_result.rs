use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_amount, round_half_up};

/// Outcome of a salary calculation.
///
/// Always satisfies `net_salary == gross_salary - income_tax - pension_contribution`
/// for values produced by [`crate::SalaryCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub gross_salary: Decimal,
    pub income_tax: Decimal,
    pub pension_contribution: Decimal,
    pub net_salary: Decimal,
}

impl SalaryResult {
    pub const ZERO: SalaryResult = SalaryResult {
        gross_salary: Decimal::ZERO,
        income_tax: Decimal::ZERO,
        pension_contribution: Decimal::ZERO,
        net_salary: Decimal::ZERO,
    };

    /// Returns a copy with every field rounded half-up to cents.
    ///
    /// Each field is rounded on its own, so the rounded values may miss the
    /// decomposition identity by a cent. Use for display only.
    pub fn rounded(&self) -> Self {
        Self {
            gross_salary: round_half_up(self.gross_salary),
            income_tax: round_half_up(self.income_tax),
            pension_contribution: round_half_up(self.pension_contribution),
            net_salary: round_half_up(self.net_salary),
        }
    }

    /// Total withheld from gross: income tax plus pension.
    pub fn total_deductions(&self) -> Decimal {
        self.income_tax + self.pension_contribution
    }
}

impl fmt::Display for SalaryResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Gross salary:         {:>14}", format_amount(self.gross_salary))?;
        writeln!(f, "Income tax:           {:>14}", format_amount(self.income_tax))?;
        writeln!(
            f,
            "Pension contribution: {:>14}",
            format_amount(self.pension_contribution)
        )?;
        writeln!(f, "Total deductions:     {:>14}", format_amount(self.total_deductions()))?;
        write!(f, "Net salary:           {:>14}", format_amount(self.net_salary))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> SalaryResult {
        SalaryResult {
            gross_salary: dec!(1234.565),
            income_tax: dec!(63.4565),
            pension_contribution: dec!(86.41955),
            net_salary: dec!(1084.68895),
        }
    }

    #[test]
    fn rounded_rounds_each_field_to_cents() {
        let rounded = sample().rounded();

        assert_eq!(rounded.gross_salary, dec!(1234.57));
        assert_eq!(rounded.income_tax, dec!(63.46));
        assert_eq!(rounded.pension_contribution, dec!(86.42));
        assert_eq!(rounded.net_salary, dec!(1084.69));
    }

    #[test]
    fn total_deductions_adds_tax_and_pension() {
        assert_eq!(sample().total_deductions(), dec!(149.87605));
    }

    #[test]
    fn display_shows_two_decimal_places() {
        let result = SalaryResult {
            gross_salary: dec!(5000),
            income_tax: dec!(697.5),
            pension_contribution: dec!(350),
            net_salary: dec!(3952.5),
        };

        let rendered = result.to_string();

        assert!(rendered.contains("5000.00"));
        assert!(rendered.contains("697.50"));
        assert!(rendered.contains("350.00"));
        assert!(rendered.contains("3952.50"));
        assert!(rendered.contains("Total deductions:"));
        assert!(rendered.contains("1047.50"));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let json = serde_json::to_value(SalaryResult::ZERO).unwrap();

        for field in [
            "gross_salary",
            "income_tax",
            "pension_contribution",
            "net_salary",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
