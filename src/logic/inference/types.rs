//! Wire types for the prediction and recommendation services

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logic::analytics::AttributionMapping;

/// Binary model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PredictionLabel {
    Negative,
    Positive,
}

impl TryFrom<u8> for PredictionLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PredictionLabel::Negative),
            1 => Ok(PredictionLabel::Positive),
            other => Err(format!("prediction must be 0 or 1, got {}", other)),
        }
    }
}

impl From<PredictionLabel> for u8 {
    fn from(label: PredictionLabel) -> Self {
        match label {
            PredictionLabel::Negative => 0,
            PredictionLabel::Positive => 1,
        }
    }
}

impl PredictionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLabel::Negative => "Negative",
            PredictionLabel::Positive => "Positive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `/predict` and `/latest-prediction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: PredictionLabel,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub shap_values: AttributionMapping,
    #[serde(default)]
    pub name: String,
}

/// Body of `/recommendations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub shap_values: AttributionMapping,
    pub risk_level: RiskLevel,
}

impl RecommendationRequest {
    /// Built only from the prediction, never from the submitted features
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        Self {
            shap_values: prediction.shap_values.clone(),
            risk_level: prediction.risk_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

/// Error body returned by the service on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
pub(crate) fn sample_prediction() -> PredictionResult {
    PredictionResult {
        prediction: PredictionLabel::Positive,
        probability: 0.82,
        risk_level: RiskLevel::High,
        shap_values: AttributionMapping::from_pairs([
            ("SMOKING", 0.31),
            ("OXYGEN_SATURATION", -0.12),
            ("CHEST_TIGHTNESS", 0.44),
        ])
        .unwrap_or_default(),
        name: "Alice".to_string(),
    }
}

/// Prediction carrying attribution for every model feature
#[cfg(test)]
pub(crate) fn wide_prediction() -> PredictionResult {
    let body = r#"{
        "name": "Bao",
        "prediction": 0,
        "probability": 0.274,
        "risk_level": "low",
        "shap_values": {
            "AGE": 0.041, "GENDER": -0.003, "SMOKING": 0.0, "FINGER_DISCOLORATION": 0.012,
            "MENTAL_STRESS": -0.027, "EXPOSURE_TO_POLLUTION": 0.012, "LONG_TERM_ILLNESS": 0.0,
            "ENERGY_LEVEL": -0.066, "IMMUNE_WEAKNESS": 0.008, "BREATHING_ISSUE": 0.101,
            "ALCOHOL_CONSUMPTION": -0.004, "THROAT_DISCOMFORT": 0.019, "OXYGEN_SATURATION": -0.088,
            "CHEST_TIGHTNESS": 0.033, "FAMILY_HISTORY": 0.0, "SMOKING_FAMILY_HISTORY": 0.006,
            "STRESS_IMMUNE": -0.011
        }
    }"#;
    serde_json::from_str(body).expect("fixture decodes")
}
