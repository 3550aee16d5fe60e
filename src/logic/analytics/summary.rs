//! Headline figures for the dashboard summary cards

use serde::Serialize;

use super::split::clamp_probability;
use crate::logic::inference::PredictionResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub outcome: &'static str,
    /// One decimal, e.g. "82.0%"
    pub probability_percent: String,
    /// Upper-case risk level, e.g. "HIGH"
    pub risk_label: String,
    pub name: String,
}

impl PredictionSummary {
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        let percent = clamp_probability(prediction.probability) * 100.0;
        Self {
            outcome: prediction.prediction.as_str(),
            probability_percent: format!("{:.1}%", percent),
            risk_label: prediction.risk_level.as_str().to_uppercase(),
            name: prediction.name.clone(),
        }
    }
}
