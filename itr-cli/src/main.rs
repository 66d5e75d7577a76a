use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use itr_cli::csv_loader;
use itr_cli::report::Report;
use itr_cli::utils::parse_money;
use itr_core::calculations::{LiabilityInput, LiabilityWorksheet, RegimeConfig};
use itr_core::models::new_regime_slabs;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// New-regime income tax calculator for FY 2025-26 (AY 2026-27).
///
/// Derives taxable income from the salary inputs, computes the slab-wise
/// liability with rebate, marginal relief and cess, and prints a report or
/// the field mapping for the return document.
#[derive(Debug, Parser)]
#[command(name = "itr", version)]
struct Cli {
    /// Gross salary for the year. Accepts comma-grouped amounts.
    #[arg(long, default_value = "0", value_parser = parse_money)]
    gross_salary: Decimal,

    /// Other salary income.
    #[arg(long, default_value = "0", value_parser = parse_money)]
    other_salary: Decimal,

    /// Standard deduction under the new regime.
    #[arg(long, default_value = "75000", value_parser = parse_money)]
    standard_deduction: Decimal,

    /// Tax already deducted or paid during the year.
    #[arg(long, default_value = "0", value_parser = parse_money)]
    tax_paid: Decimal,

    /// CSV file with an alternate slab schedule (columns: lower_bound,
    /// upper_bound, rate; empty upper_bound for the top slab).
    #[arg(long)]
    slabs: Option<PathBuf>,

    /// Print the form field mapping as JSON instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // The worksheet does no defensive validation; reject bad input here.
    for (label, amount) in [
        ("gross salary", cli.gross_salary),
        ("other salary", cli.other_salary),
        ("standard deduction", cli.standard_deduction),
        ("tax paid", cli.tax_paid),
    ] {
        if amount < Decimal::ZERO {
            bail!("{label} cannot be negative (got {amount})");
        }
    }

    let slabs = match &cli.slabs {
        Some(path) => csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to load slab schedule: {}", path.display()))?,
        None => new_regime_slabs(),
    };

    let taxable_income =
        (cli.gross_salary + cli.other_salary - cli.standard_deduction).max(Decimal::ZERO);
    debug!(%taxable_income, "derived taxable income");

    let worksheet = LiabilityWorksheet::new(&slabs, RegimeConfig::fy_2025_26());
    let result = worksheet
        .calculate(&LiabilityInput {
            taxable_income,
            tax_paid: cli.tax_paid,
        })
        .context("Failed to calculate liability")?;

    if cli.json {
        let fields = result.form_fields()?;
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        print!(
            "{}",
            Report {
                result: &result,
                slabs: &slabs,
                tax_paid: cli.tax_paid,
            }
        );
    }

    Ok(())
}
