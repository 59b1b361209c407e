//! CSV loading for the Census and Zillow extracts.
//!
//! The Census files carry fixed, named columns and deserialize straight into
//! row structs; columns not named in the structs are ignored, which is all
//! the column projection this pipeline needs. The Zillow file has one column
//! per month, so it is read by header index instead.

use anyhow::{Context, Result, anyhow};
use chrono::{Months, NaiveDate};
use csv::StringRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// Row from `median_age.csv`. ZIPs arrive as 5-digit strings with a leading
/// zero (Massachusetts), and the file also contains non-ZIP summary rows that
/// the normalizer drops later.
#[derive(Debug, Deserialize)]
pub struct AgeRow {
    pub name: String,
    #[serde(rename = "B01002A001")]
    pub median_age: Option<f64>,
}

/// Row from `median_income.csv`. ZIPs arrive already in 4-digit form.
#[derive(Debug, Deserialize)]
pub struct IncomeRow {
    pub name: String,
    #[serde(rename = "B19013001")]
    pub median_income: Option<f64>,
}

/// Row from `tenure_b25003.csv`: occupied housing unit counts per ZIP.
#[derive(Debug, Deserialize)]
pub struct TenureRow {
    pub name: String,
    #[serde(rename = "B25003001")]
    pub total_occupied: Option<f64>,
    #[serde(rename = "B25003003")]
    pub renter_occupied: Option<f64>,
}

/// Region identity plus the twelve month-end rent observations, in month
/// order, projected out of `Zillow_Renter_Zip_Code.csv`.
#[derive(Debug)]
pub struct RentalRow {
    pub region_name: u32,
    pub city: String,
    pub state_name: String,
    pub months: Vec<Option<f64>>,
}

/// Reads every row of a headered CSV into `T`. Rows that fail to deserialize
/// are skipped with a warning rather than aborting the load.
pub fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            // Header is line 1, so the first data row is line 2.
            Err(e) => warn!(line = i + 2, path = %path.display(), error = %e, "Skipping unreadable row"),
        }
    }

    debug!(rows = rows.len(), path = %path.display(), "CSV loaded");
    Ok(rows)
}

/// Column names for the last day of each month of `year`, as Zillow writes
/// them (`YYYY-MM-DD`).
pub fn month_end_columns(year: i32) -> Vec<String> {
    (1..=12)
        .filter_map(|m| {
            NaiveDate::from_ymd_opt(year, m, 1)
                .and_then(|d| d.checked_add_months(Months::new(1)))
                .and_then(|d| d.pred_opt())
        })
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

/// Loads the Zillow rental extract, keeping the region identity columns and
/// the monthly observations for `year`.
///
/// Rows whose `RegionName` does not parse as an integer are dropped; a
/// missing identity or month column in the header is an error.
pub fn load_rentals(path: &Path, year: i32) -> Result<Vec<RentalRow>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let headers = rdr.headers()?.clone();

    let region_idx = column_index(&headers, "RegionName", path)?;
    let city_idx = column_index(&headers, "City", path)?;
    let state_idx = column_index(&headers, "StateName", path)?;
    let month_idxs = month_end_columns(year)
        .iter()
        .map(|col| column_index(&headers, col, path))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let region_name = record
            .get(region_idx)
            .and_then(|v| v.trim().parse::<u32>().ok());
        let Some(region_name) = region_name else {
            debug!(path = %path.display(), "Dropping rental row with unparsable RegionName");
            continue;
        };

        let months = month_idxs
            .iter()
            .map(|&i| record.get(i).and_then(parse_cell))
            .collect();

        rows.push(RentalRow {
            region_name,
            city: record.get(city_idx).unwrap_or_default().to_string(),
            state_name: record.get(state_idx).unwrap_or_default().to_string(),
            months,
        });
    }

    debug!(rows = rows.len(), path = %path.display(), "Rental CSV loaded");
    Ok(rows)
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| anyhow!("column {name} missing from {}", path.display()))
}

fn parse_cell(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}
