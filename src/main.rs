//! CLI entry point for the Boston rental trends report.
//!
//! Provides subcommands for the joined Census demographic summary, the Boston
//! rental tables from the Zillow extract, and the combined report.

use anyhow::Result;
use boston_rental_trends::demographics::{self, DemographicRecord};
use boston_rental_trends::loader::{self, AgeRow, IncomeRow, TenureRow};
use boston_rental_trends::rentals::{self, RENT_YEAR, boston_rentals, split_by_availability};
use boston_rental_trends::report;
use boston_rental_trends::zips::ZipAllowList;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "boston_rental_trends")]
#[command(about = "Boston rental and demographic report from Census and Zillow extracts", long_about = None)]
struct Cli {
    /// Directory holding the input CSV extracts
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional JSON file with a ZIP allow-list (array of integers),
    /// replacing the built-in Boston list
    #[arg(long)]
    zips: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the Census tables and print the demographic summary
    Demographics,
    /// Filter the Zillow extract to Boston and print the rental tables
    Rentals,
    /// Print the full combined report
    Report,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let allow_list = match &cli.zips {
        Some(path) => ZipAllowList::load(path)?,
        None => ZipAllowList::boston(),
    };
    info!(zips = allow_list.len(), "ZIP allow-list ready");

    match cli.command {
        Commands::Demographics => {
            let demo = load_demographics(&cli.data_dir)?;
            report::print_demographic_summary(&demo);
        }
        Commands::Rentals => {
            let (with_data, missing) = load_rentals(&cli.data_dir, &allow_list)?;
            report::print_rental_report(&with_data, &missing);
        }
        Commands::Report => {
            run_report(&cli.data_dir, &allow_list)?;
        }
    }

    Ok(())
}

/// Loads and joins the three Census tables into one record set keyed by
/// canonical ZIP.
fn load_demographics(data_dir: &Path) -> Result<Vec<DemographicRecord>> {
    let age_rows: Vec<AgeRow> = loader::load_rows(&data_dir.join("median_age.csv"))?;
    let income_rows: Vec<IncomeRow> = loader::load_rows(&data_dir.join("median_income.csv"))?;
    let tenure_rows: Vec<TenureRow> = loader::load_rows(&data_dir.join("tenure_b25003.csv"))?;

    let age = demographics::age_by_zip(&age_rows)?;
    let income = demographics::income_by_zip(&income_rows)?;
    let renters = demographics::renter_share_by_zip(&tenure_rows)?;

    let joined = demographics::join_demographics(&age, &income, &renters);
    info!(rows = joined.len(), "Demographic tables joined");
    Ok(joined)
}

/// Loads the Zillow extract and splits the Boston rows by rent availability.
fn load_rentals(
    data_dir: &Path,
    zips: &ZipAllowList,
) -> Result<(Vec<rentals::BostonRental>, Vec<rentals::BostonRental>)> {
    let rows = loader::load_rentals(&data_dir.join("Zillow_Renter_Zip_Code.csv"), RENT_YEAR)?;
    let matched = boston_rentals(rows, zips);
    info!(rows = matched.len(), "Rental rows matched the allow-list");
    Ok(split_by_availability(matched))
}

/// The full report: demographic summary, rental tables, Boston demographic
/// table, and the closing data-sources block.
fn run_report(data_dir: &Path, zips: &ZipAllowList) -> Result<()> {
    let demo = load_demographics(data_dir)?;
    report::print_demographic_summary(&demo);

    println!();
    println!("{}", "=".repeat(80));
    println!();

    let (with_data, missing) = load_rentals(data_dir, zips)?;
    report::print_rental_report(&with_data, &missing);

    println!();
    println!("{}", "=".repeat(80));
    println!();

    let boston_demo = demographics::filter_boston(&demo, zips);
    report::print_boston_demographics(&boston_demo);

    println!();
    report::print_data_sources(with_data.len(), missing.len(), boston_demo.len());

    Ok(())
}
