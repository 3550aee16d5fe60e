//! Attribution Analytics
//!
//! Pure views over one prediction's attribution mapping:
//! - ranked (largest contribution first, stable on ties)
//! - cumulative (arrival order, running sum)
//! - probability split (from the scalar probability only)
//!
//! Views are recomputed on demand from the canonical `PredictionResult` and
//! never cached, so they cannot drift apart.

pub mod integrity;
pub mod mapping;
pub mod split;
pub mod summary;
pub mod views;


use serde::Serialize;

pub use integrity::DataIntegrityWarning;
pub use mapping::{AttributionEntry, AttributionMapping, DuplicateFeature};
pub use split::{probability_split, ProbabilitySplit};
pub use summary::PredictionSummary;
pub use views::{cumulative_attribution, ranked_attribution, CumulativeEntry};

use crate::logic::inference::PredictionResult;

/// Everything the dashboard renders for one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub summary: PredictionSummary,
    pub ranked: Vec<AttributionEntry>,
    pub cumulative: Vec<CumulativeEntry>,
    pub split: ProbabilitySplit,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl DerivedViews {
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        Self {
            summary: PredictionSummary::from_prediction(prediction),
            ranked: ranked_attribution(&prediction.shap_values),
            cumulative: cumulative_attribution(&prediction.shap_values),
            split: probability_split(prediction.probability),
            warnings: integrity::inspect(prediction),
        }
    }
}
