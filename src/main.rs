//! Pension Interest CLI
//!
//! Command-line interface for estimating overdue interest on pension contributions

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use pension_interest::collection::CollectionStatus;
use pension_interest::request::{parse_date, parse_principal};
use pension_interest::{
    CalculationRequest, CalculationResult, CalculatorConfig, ContributionPeriod, DeadlineSource,
};

/// Overdue interest estimator for national pension contributions
#[derive(Parser)]
#[command(name = "pension_interest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Rate table CSV (Year,Rate); overrides PENSION_RATE_TABLE
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate overdue interest for one contribution
    Calc(CalcArgs),

    /// Show the statutory deadline for a contribution period
    Deadline(PeriodArgs),

    /// Print the effective rate table
    Rates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable breakdown
    #[default]
    Table,
    /// JSON document
    Json,
}

#[derive(Args)]
struct PeriodArgs {
    /// Era year of the contribution period (e.g. 112)
    #[arg(long)]
    period_year: i32,

    /// Month of the contribution period (1-12)
    #[arg(long)]
    period_month: u32,
}

#[derive(Args)]
struct CalcArgs {
    /// Principal in whole currency units; thousands separators allowed
    #[arg(short, long)]
    principal: String,

    /// Payment deadline (YYYY-MM-DD or era form 112/06/30)
    #[arg(short, long, conflicts_with_all = ["period_year", "period_month"])]
    deadline: Option<String>,

    /// Era year of the contribution period, used when no deadline is given
    #[arg(long, requires = "period_month")]
    period_year: Option<i32>,

    /// Month of the contribution period (1-12)
    #[arg(long, requires = "period_year")]
    period_month: Option<u32>,

    /// Payment date (default: today)
    #[arg(long)]
    paid: Option<String>,

    /// Interest at or below this amount is waived; overrides PENSION_EXEMPTION_THRESHOLD
    #[arg(long)]
    threshold: Option<u64>,
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    principal: u64,
    deadline: NaiveDate,
    payment_date: NaiveDate,
    raw_total: f64,
    status: CollectionStatus,
    amount_due: u64,
    exemption_threshold: u64,
    #[serde(flatten)]
    result: &'a CalculationResult,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::from_env().with_rate_table(cli.rates.clone());

    match cli.command {
        Commands::Calc(args) => run_calc(args, config, cli.format),
        Commands::Deadline(args) => run_deadline(args, cli.format),
        Commands::Rates => run_rates(config, cli.format),
    }
}

fn run_calc(args: CalcArgs, config: CalculatorConfig, format: OutputFormat) -> Result<()> {
    let config = config.with_exemption_threshold(args.threshold);
    let calculator = config.calculator().context("Failed to load rate table")?;
    let policy = config.exemption_policy();

    let principal = parse_principal(&args.principal)?;
    let deadline = args.deadline.as_deref().map(parse_date).transpose()?;
    let source = DeadlineSource::from_parts(deadline, args.period_year, args.period_month)?;
    let payment_date = match args.paid.as_deref() {
        Some(text) => parse_date(text)?,
        None => Local::now().date_naive(),
    };

    let request = CalculationRequest {
        principal,
        deadline: source,
        payment_date,
    };
    let result = request.evaluate(&calculator);
    let status = policy.assess(&result);

    match format {
        OutputFormat::Json => {
            let output = CalcOutput {
                principal,
                deadline: request.deadline_date(),
                payment_date,
                raw_total: result.raw_total(),
                status,
                amount_due: policy.amount_due(&result),
                exemption_threshold: policy.threshold,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => print_breakdown(&request, &result, status, policy.threshold),
    }

    Ok(())
}

fn print_breakdown(
    request: &CalculationRequest,
    result: &CalculationResult,
    status: CollectionStatus,
    threshold: u64,
) {
    println!("Principal:     {}", request.principal);
    println!("Deadline:      {}", request.deadline_date());
    println!("Payment date:  {}", request.payment_date);

    let window = match result.window {
        Some(window) => window,
        None => {
            println!("\nPaid on or before the deadline: no interest is due.");
            return;
        }
    };

    println!("Accrual:       {} to {} ({} days)", window.start, window.end, window.days());
    println!();
    println!("{:>6} {:>6} {:>8} {:>12}", "Year", "Days", "Rate%", "Interest");
    println!("{}", "-".repeat(35));
    for seg in &result.segments {
        println!("{:>6} {:>6} {:>8} {:>12.1}", seg.year, seg.days, seg.rate, seg.interest);
    }
    println!("{}", "-".repeat(35));
    println!("{:>6} {:>6} {:>8} {:>12.1}", "Total", result.overdue_days(), "", result.raw_total());
    println!();

    match status {
        CollectionStatus::Exempt => println!(
            "Interest: {} (at or below {}, waived)",
            result.final_interest, threshold
        ),
        CollectionStatus::Payable => println!(
            "Interest due: {} (above {}, payable with the contribution)",
            result.final_interest, threshold
        ),
    }
}

fn run_deadline(args: PeriodArgs, format: OutputFormat) -> Result<()> {
    let period = ContributionPeriod::new(args.period_year, args.period_month)?;
    let deadline = period.deadline();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "period": period,
                "coverage_end_month": period.coverage_end_month(),
                "deadline": deadline,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!(
                "Period {}/{:02} (Gregorian {}), billing period ends month {}",
                period.era_year(),
                period.month(),
                period.gregorian_year(),
                period.coverage_end_month()
            );
            println!("Payment deadline: {}", deadline);
        }
    }

    Ok(())
}

fn run_rates(config: CalculatorConfig, format: OutputFormat) -> Result<()> {
    let table = config.load_rate_table().context("Failed to load rate table")?;

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = table
                .iter()
                .map(|(year, rate)| serde_json::json!({ "year": year, "rate": rate }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            println!("{:>6} {:>8}", "Year", "Rate%");
            for (year, rate) in table.iter() {
                println!("{:>6} {:>8}", year, rate);
            }
            println!(
                "\nYears outside {}-{} use the {} rate ({}%).",
                table.earliest_year(),
                table.latest_year(),
                table.latest_year(),
                table.latest_rate()
            );
        }
    }

    Ok(())
}
