//! ZIP allow-list configuration.
//!
//! Both the rental filter and the Boston demographic filter consume the same
//! allow-list instance, so the two call sites cannot drift apart.

use anyhow::{Context, Result};
use std::collections::BTreeSet;

/// ZIP codes covering the city of Boston.
///
/// The data sheets do not zero-pad Massachusetts ZIPs, so these are plain
/// integers. 2199 is Back Bay; 2210 and 2215 are only partially Boston.
const BOSTON_ZIPS: &[u32] = &[
    2108, 2109, 2110, 2111, 2113, 2114, 2115, 2116, 2118, 2119, 2120, 2121, 2122, 2124, 2125,
    2126, 2127, 2128, 2129, 2130, 2131, 2132, 2134, 2135, 2136, 2199, 2210, 2215,
];

/// Membership filter restricting rows to the city of interest.
#[derive(Debug, Clone)]
pub struct ZipAllowList {
    zips: BTreeSet<u32>,
}

impl ZipAllowList {
    /// The built-in Boston list.
    pub fn boston() -> Self {
        Self {
            zips: BOSTON_ZIPS.iter().copied().collect(),
        }
    }

    /// Loads an allow-list from a JSON file holding an array of integer ZIP
    /// codes, e.g. `[2108, 2109, 2110]`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading ZIP allow-list from {path}"))?;
        let zips: Vec<u32> = serde_json::from_str(&content)
            .with_context(|| format!("parsing ZIP allow-list in {path}"))?;
        Ok(Self {
            zips: zips.into_iter().collect(),
        })
    }

    pub fn contains(&self, zip: u32) -> bool {
        self.zips.contains(&zip)
    }

    /// Membership test against a canonical 4-digit string key. Keys that do
    /// not parse as integers are treated as absent.
    pub fn contains_key(&self, zip: &str) -> bool {
        zip.parse::<u32>().map(|z| self.contains(z)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.zips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zips.is_empty()
    }
}

impl Default for ZipAllowList {
    fn default() -> Self {
        Self::boston()
    }
}
