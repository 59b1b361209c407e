//! Table rendering and field formatting for the stdout report.
//!
//! Formatting is presentation-only: every formatter takes the value by copy
//! and returns a fresh string, so the underlying records are never altered.

use crate::demographics::DemographicRecord;
use crate::rentals::BostonRental;
use prettytable::{Cell, Row, Table};

/// `$12,345` — integer dollars, comma-grouped. "N/A" when absent.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${}", group_thousands(v.round() as i64)),
        _ => "N/A".to_string(),
    }
}

/// `$1,234.56` — comma-grouped with two decimal places. "N/A" when absent.
pub fn format_rent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let cents = (v * 100.0).round() as i64;
            format!(
                "${}.{:02}",
                group_thousands(cents / 100),
                (cents % 100).abs()
            )
        }
        _ => "N/A".to_string(),
    }
}

/// `34.5 years`. "N/A" when absent.
pub fn format_age(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1} years"),
        _ => "N/A".to_string(),
    }
}

/// `12.3%`. "N/A" when absent.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}%"),
        _ => "N/A".to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        grouped.push('-');
    }
    grouped.chars().rev().collect()
}

/// Joined demographic rows as an aligned table with display formatting.
pub fn demographic_table(records: &[DemographicRecord]) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("ZIP"),
        Cell::new("Median_Age"),
        Cell::new("Median_Income"),
        Cell::new("Percent_Renters"),
    ]));
    for r in records {
        table.add_row(Row::new(vec![
            Cell::new(&r.zip),
            Cell::new(&format_age(r.median_age)).style_spec("r"),
            Cell::new(&format_currency(r.median_income)).style_spec("r"),
            Cell::new(&format_percentage(r.percent_renters)).style_spec("r"),
        ]));
    }
    table
}

/// Rental rows as an aligned table. With `missing` set the rent column
/// renders the literal `No Data` instead of a value.
pub fn rental_table(rentals: &[BostonRental], missing: bool) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("City"),
        Cell::new("StateName"),
        Cell::new("RegionName"),
        Cell::new("avg_rent_2024"),
    ]));
    for r in rentals {
        let rent = if missing {
            "No Data".to_string()
        } else {
            format_rent(r.avg_rent_2024)
        };
        table.add_row(Row::new(vec![
            Cell::new(&r.city),
            Cell::new(&r.state_name),
            Cell::new(&r.zip.to_string()).style_spec("r"),
            Cell::new(&rent).style_spec("r"),
        ]));
    }
    table
}

/// Demographic data summary: source line, row count, and the first rows of
/// the joined table.
pub fn print_demographic_summary(records: &[DemographicRecord]) {
    println!("Demographic Data Summary:");
    println!("Data Source: ACS 2023 5-year estimates (2019-2023)");
    println!("Total ZIP codes with demographic data: {}", records.len());
    println!();
    println!("First few rows of demographic data:");
    demographic_table(&records[..records.len().min(10)]).printstd();
}

/// Boston rental sections: the with-data table followed by the missing-data
/// table.
pub fn print_rental_report(with_data: &[BostonRental], missing: &[BostonRental]) {
    println!("Boston Rental Data - With Average Rent 2024:");
    println!("Data Source: Zillow Rental Data (January - December 2024)");
    rental_table(with_data, false).printstd();

    println!();
    println!("{}", "=".repeat(60));
    println!();

    println!("Boston Rental Data - Missing Average Rent 2024:");
    rental_table(missing, true).printstd();
}

/// Demographic table restricted to Boston ZIPs.
pub fn print_boston_demographics(records: &[DemographicRecord]) {
    println!("Boston ZIP Codes with Demographic Data:");
    println!("Demographic Data: ACS 2023 5-year estimates (2019-2023)");
    println!(
        "Total Boston ZIP codes with demographic data: {}",
        records.len()
    );
    if records.is_empty() {
        println!("No demographic data found for Boston ZIP codes.");
        return;
    }
    demographic_table(records).printstd();
}

/// Closing data-sources block. Coverage counts come from the actual data.
pub fn print_data_sources(with_data: usize, missing: usize, demo_zips: usize) {
    let rule = "=".repeat(80);
    println!("{rule}");
    println!("DATA SUMMARY & TIME FRAMES");
    println!("{rule}");
    println!("RENTAL DATA:");
    println!("   - Source: Zillow Rental Listings");
    println!("   - Time Period: January 2024 - December 2024");
    println!("   - Coverage: {with_data} Boston ZIP codes with data, {missing} missing");
    println!();
    println!("DEMOGRAPHIC DATA:");
    println!("   - Source: U.S. Census Bureau ACS 2023 5-year estimates");
    println!("   - Time Period: 2019-2023 (5-year average)");
    println!("   - Coverage: {demo_zips} Boston ZIP codes");
    println!();
    println!("NOTE: Demographic data represents 5-year averages (2019-2023)");
    println!("   while rental data is from 2024 only. This timing difference");
    println!("   should be considered when interpreting correlations.");
    println!("{rule}");
}
