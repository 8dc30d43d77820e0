use std::borrow::Cow;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use salary_cli::logging::init_logging;
use salary_cli::render::{OutputFormat, render_result, render_schedule};
use salary_core::utils::parse_amount;
use salary_core::{SalaryCalculator, ScheduleLoader, TaxSchedule};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross/net salary calculator.
///
/// Applies a progressive income tax schedule and a flat pension deduction.
/// Amounts are currency-agnostic and may use `,` as a thousands separator.
#[derive(Debug, Parser)]
#[command(name = "salary", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// CSV file with an alternative bracket table (`upper_bound,rate`).
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    /// Pension rate as a fraction of gross, e.g. `0.07`.
    ///
    /// Replaces the standard rate and applies to the built-in brackets as well
    /// as to a schedule loaded with `--schedule`.
    #[arg(long, global = true)]
    pension_rate: Option<Decimal>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute income tax, pension and net salary from a gross salary.
    Gross {
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Show the income tax owed in each band.
        #[arg(long)]
        breakdown: bool,
    },
    /// Find the gross salary that yields a given net salary.
    Net {
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Show the income tax owed in each band.
        #[arg(long)]
        breakdown: bool,
    },
    /// Print the active bracket table and pension rate.
    Schedule,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn load_schedule(cli: &Cli) -> Result<Cow<'static, TaxSchedule>> {
    let standard = TaxSchedule::standard();
    let pension_rate = cli.pension_rate.unwrap_or(standard.pension_rate());

    let Some(path) = &cli.schedule else {
        return match cli.pension_rate {
            None => Ok(Cow::Borrowed(standard)),
            Some(rate) => {
                debug!(%rate, "overriding standard pension rate");
                let schedule = TaxSchedule::new(standard.brackets().to_vec(), rate)
                    .context("Invalid --pension-rate")?;
                Ok(Cow::Owned(schedule))
            }
        };
    };

    debug!("loading schedule from {}", path.display());
    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let schedule = ScheduleLoader::load(file, pension_rate)
        .with_context(|| format!("Failed to load schedule: {}", path.display()))?;

    Ok(Cow::Owned(schedule))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let schedule = load_schedule(&cli)?;
    let calculator = SalaryCalculator::new(&schedule);

    let output = match &cli.command {
        Command::Gross { amount, breakdown } => {
            let gross = parse_amount(amount).context("Please enter a valid gross salary")?;
            let result = calculator.compute_from_gross(gross)?;
            info!(%gross, net = %result.net_salary, "computed net salary");

            let bands = breakdown
                .then(|| calculator.tax_breakdown(gross))
                .transpose()?;
            render_result(&result, bands.as_deref(), cli.format)?
        }
        Command::Net { amount, breakdown } => {
            let net = parse_amount(amount).context("Please enter a valid net salary")?;
            let result = calculator.compute_from_net(net)?;
            info!(%net, gross = %result.gross_salary, "computed gross salary");

            let bands = breakdown
                .then(|| calculator.tax_breakdown(result.gross_salary))
                .transpose()?;
            render_result(&result, bands.as_deref(), cli.format)?
        }
        Command::Schedule => render_schedule(calculator.schedule(), cli.format)?,
    };

    println!("{output}");
    Ok(())
}
