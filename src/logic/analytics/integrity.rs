//! Data integrity checks on accepted predictions
//!
//! Anomalies here never fail a workflow. They are reported, logged, and the
//! display layer clamps where needed.

use serde::Serialize;

use crate::logic::features::layout::{is_model_feature, model_feature_names};
use crate::logic::inference::PredictionResult;

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    #[error("probability {probability} outside [0, 1]")]
    ProbabilityOutOfRange { probability: f64 },

    #[error("contribution for {feature} is not finite")]
    NonFiniteContribution { feature: String },

    #[error("attribution refers to unknown feature {feature}")]
    UnknownFeature { feature: String },

    #[error("attribution is missing model features: {}", .features.join(", "))]
    MissingFeatures { features: Vec<String> },
}

/// Collect every anomaly in a prediction
pub fn inspect(prediction: &PredictionResult) -> Vec<DataIntegrityWarning> {
    let mut warnings = Vec::new();

    let p = prediction.probability;
    if !(0.0..=1.0).contains(&p) {
        warnings.push(DataIntegrityWarning::ProbabilityOutOfRange { probability: p });
    }

    for entry in &prediction.shap_values {
        if !entry.value.is_finite() {
            warnings.push(DataIntegrityWarning::NonFiniteContribution {
                feature: entry.feature.clone(),
            });
        }
        if !is_model_feature(&entry.feature) {
            warnings.push(DataIntegrityWarning::UnknownFeature {
                feature: entry.feature.clone(),
            });
        }
    }

    let missing: Vec<String> = model_feature_names()
        .filter(|name| !prediction.shap_values.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        warnings.push(DataIntegrityWarning::MissingFeatures { features: missing });
    }

    warnings
}

/// [`inspect`] and log each anomaly
pub fn inspect_and_log(prediction: &PredictionResult) -> Vec<DataIntegrityWarning> {
    let warnings = inspect(prediction);
    for warning in &warnings {
        tracing::warn!("Data integrity: {}", warning);
    }
    warnings
}
