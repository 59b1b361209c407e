//! Boston rental filtering and the yearly average-rent aggregation.

use crate::loader::RentalRow;
use crate::zips::ZipAllowList;

/// The year whose monthly observations feed the rent average.
pub const RENT_YEAR: i32 = 2024;

/// One Boston region with its computed yearly rent average. `None` means no
/// month of the year had an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct BostonRental {
    pub zip: u32,
    pub city: String,
    pub state_name: String,
    pub avg_rent_2024: Option<f64>,
}

/// Mean of the observed months, rounded to 2 decimal places. Missing months
/// are excluded from the mean, not counted as zero; all-missing yields `None`.
pub fn average_rent(months: &[Option<f64>]) -> Option<f64> {
    let observed: Vec<f64> = months.iter().flatten().copied().collect();
    if observed.is_empty() {
        return None;
    }
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

/// Keeps rows whose region is on the allow-list (integer-to-integer
/// comparison) and attaches the computed rent average.
pub fn boston_rentals(rows: Vec<RentalRow>, zips: &ZipAllowList) -> Vec<BostonRental> {
    rows.into_iter()
        .filter(|r| zips.contains(r.region_name))
        .map(|r| BostonRental {
            zip: r.region_name,
            city: r.city,
            state_name: r.state_name,
            avg_rent_2024: average_rent(&r.months),
        })
        .collect()
}

/// Splits rentals into (rows with a computed average, rows without).
pub fn split_by_availability(rentals: Vec<BostonRental>) -> (Vec<BostonRental>, Vec<BostonRental>) {
    rentals.into_iter().partition(|r| r.avg_rent_2024.is_some())
}
