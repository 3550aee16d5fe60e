//! Ranked and cumulative attribution views
//!
//! Both views copy contribution values unchanged from the mapping; only the
//! order (ranked) or an extra running total (cumulative) is added.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::mapping::{AttributionEntry, AttributionMapping};

/// Cumulative view row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeEntry {
    pub feature: String,
    pub value: f64,
    pub cumulative: f64,
}

/// Entries by contribution, largest first. Ties keep arrival order.
pub fn ranked_attribution(mapping: &AttributionMapping) -> Vec<AttributionEntry> {
    let mut ranked = mapping.entries().to_vec();
    // slice::sort_by is stable
    ranked.sort_by(|a, b| descending(a.value, b.value));
    ranked
}

/// Entries in arrival order with a left-to-right running sum
pub fn cumulative_attribution(mapping: &AttributionMapping) -> Vec<CumulativeEntry> {
    let mut running = 0.0;
    mapping
        .iter()
        .map(|entry| {
            running += entry.value;
            CumulativeEntry {
                feature: entry.feature.clone(),
                value: entry.value,
                cumulative: running,
            }
        })
        .collect()
}

/// Descending order, total over all f64: `0.0 == -0.0`, NaN last
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
