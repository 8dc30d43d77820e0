//! Text and JSON rendering of calculation results and schedules.

use std::fmt::Write;

use anyhow::Result;
use rust_decimal::Decimal;
use salary_core::calculations::common::{format_amount, format_rate};
use salary_core::{BandTax, SalaryResult, TaxSchedule};
use serde::Serialize;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct ResultReport<'a> {
    result: SalaryResult,
    total_deductions: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a [BandTax]>,
}

#[derive(Serialize)]
struct ScheduleReport<'a> {
    brackets: &'a [salary_core::TaxBracket],
    pension_rate: Decimal,
}

fn band_label(
    lower: Decimal,
    upper: Option<Decimal>,
) -> String {
    match upper {
        Some(upper) => format!("{} - {}", format_amount(lower), format_amount(upper)),
        None => format!("above {}", format_amount(lower)),
    }
}

/// Renders a salary result, optionally followed by its per-band tax.
///
/// Text output is rounded to cents; JSON carries the exact values.
pub fn render_result(
    result: &SalaryResult,
    breakdown: Option<&[BandTax]>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ResultReport {
            result: *result,
            total_deductions: result.total_deductions(),
            breakdown,
        })?),
        OutputFormat::Text => {
            let mut out = result.to_string();
            if let Some(bands) = breakdown {
                out.push_str("\n\nIncome tax by band:");
                for band in bands {
                    write!(
                        out,
                        "\n  {:<24} {:>5}  on {:>14}  = {:>12}",
                        band_label(band.lower, band.upper),
                        format_rate(band.rate),
                        format_amount(band.taxable),
                        format_amount(band.tax)
                    )?;
                }
            }
            Ok(out)
        }
    }
}

/// Renders the bracket table and pension rate of `schedule`.
pub fn render_schedule(
    schedule: &TaxSchedule,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ScheduleReport {
            brackets: schedule.brackets(),
            pension_rate: schedule.pension_rate(),
        })?),
        OutputFormat::Text => {
            let mut out = String::from("Income tax brackets:");
            for (lower, upper, rate) in schedule.bands() {
                write!(out, "\n  {:<24} {:>5}", band_label(lower, upper), format_rate(rate))?;
            }
            write!(
                out,
                "\nPension contribution: {} of gross",
                format_rate(schedule.pension_rate())
            )?;
            Ok(out)
        }
    }
}
