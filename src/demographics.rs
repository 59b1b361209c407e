//! Normalization and joining of the Census demographic tables.
//!
//! The three sources disagree on ZIP representation: the age extract carries
//! 5-digit strings with a leading zero, the income and tenure extracts carry
//! 4-digit values. Everything is reconciled to a canonical 4-digit string key
//! before the inner joins.

use crate::loader::{AgeRow, IncomeRow, TenureRow};
use crate::zips::ZipAllowList;
use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

static FIVE_DIGIT_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").unwrap());

/// One joined demographic observation, keyed by canonical 4-digit ZIP.
///
/// `None` fields are source cells that were absent, or a renter share whose
/// denominator was zero or missing. They render as "N/A" in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRecord {
    pub zip: String,
    pub median_age: Option<f64>,
    pub median_income: Option<f64>,
    pub percent_renters: Option<f64>,
}

/// Canonicalizes a 5-digit ZIP by stripping the leading character. Returns
/// `None` for anything that is not exactly five digits, which also drops the
/// age extract's non-ZIP summary rows.
pub fn normalize_age_zip(raw: &str) -> Option<String> {
    if FIVE_DIGIT_ZIP.is_match(raw) {
        Some(raw[1..].to_string())
    } else {
        None
    }
}

/// Median age per canonical ZIP. Rows without a 5-digit ZIP are dropped;
/// duplicate ZIPs within the table are a fatal error.
pub fn age_by_zip(rows: &[AgeRow]) -> Result<HashMap<String, Option<f64>>> {
    let mut map = HashMap::new();
    for row in rows {
        let Some(zip) = normalize_age_zip(row.name.trim()) else {
            debug!(name = %row.name, "Dropping age row without a 5-digit ZIP");
            continue;
        };
        if map.insert(zip.clone(), row.median_age).is_some() {
            bail!("duplicate ZIP {zip} in median age table");
        }
    }
    Ok(map)
}

/// Median household income per ZIP. The income extract already carries
/// 4-digit keys, so no reshaping is needed.
pub fn income_by_zip(rows: &[IncomeRow]) -> Result<HashMap<String, Option<f64>>> {
    let mut map = HashMap::new();
    for row in rows {
        let zip = row.name.trim().to_string();
        if map.insert(zip.clone(), row.median_income).is_some() {
            bail!("duplicate ZIP {zip} in median income table");
        }
    }
    Ok(map)
}

/// Renter share per ZIP: `renter_occupied / total_occupied * 100`. A zero or
/// missing denominator yields `None` rather than an error.
pub fn renter_share_by_zip(rows: &[TenureRow]) -> Result<HashMap<String, Option<f64>>> {
    let mut map = HashMap::new();
    for row in rows {
        let zip = row.name.trim().to_string();
        let share = match (row.renter_occupied, row.total_occupied) {
            (Some(renters), Some(total)) if total > 0.0 => Some(renters / total * 100.0),
            _ => None,
        };
        if map.insert(zip.clone(), share).is_some() {
            bail!("duplicate ZIP {zip} in tenure table");
        }
    }
    Ok(map)
}

/// Inner join of the three per-ZIP maps: a ZIP absent from any one source is
/// absent from the result. Output is sorted by ZIP for stable display.
pub fn join_demographics(
    age: &HashMap<String, Option<f64>>,
    income: &HashMap<String, Option<f64>>,
    renters: &HashMap<String, Option<f64>>,
) -> Vec<DemographicRecord> {
    let mut records: Vec<DemographicRecord> = age
        .iter()
        .filter_map(|(zip, &median_age)| {
            let &median_income = income.get(zip)?;
            let &percent_renters = renters.get(zip)?;
            Some(DemographicRecord {
                zip: zip.clone(),
                median_age,
                median_income,
                percent_renters,
            })
        })
        .collect();
    records.sort_by(|a, b| a.zip.cmp(&b.zip));
    records
}

/// Restricts joined records to the allow-list. String keys are compared as
/// integers, matching the rental-side filter.
pub fn filter_boston(records: &[DemographicRecord], zips: &ZipAllowList) -> Vec<DemographicRecord> {
    records
        .iter()
        .filter(|r| zips.contains_key(&r.zip))
        .cloned()
        .collect()
}
