//! Feature Vector - request body of `/predict`
//!
//! Field declaration order is the wire key order (see `layout.rs`).
//! Only the encoder builds one from user input; tests and callers with
//! already-typed data may use the struct literal directly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FeatureVector {
    pub age: i64,
    pub gender: i64,
    pub smoking: u8,
    pub finger_discoloration: u8,
    pub mental_stress: u8,
    pub exposure_to_pollution: u8,
    pub long_term_illness: u8,
    pub energy_level: i64,
    pub immune_weakness: u8,
    pub breathing_issue: u8,
    pub alcohol_consumption: u8,
    pub throat_discomfort: u8,
    pub oxygen_saturation: f64,
    pub chest_tightness: u8,
    pub family_history: u8,
    pub smoking_family_history: u8,
    pub stress_immune: i64,
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[cfg(test)]
pub(crate) fn sample_vector() -> FeatureVector {
    FeatureVector {
        age: 45,
        gender: 1,
        smoking: 1,
        finger_discoloration: 0,
        mental_stress: 0,
        exposure_to_pollution: 0,
        long_term_illness: 0,
        energy_level: 70,
        immune_weakness: 0,
        breathing_issue: 0,
        alcohol_consumption: 0,
        throat_discomfort: 0,
        oxygen_saturation: 96.5,
        chest_tightness: 0,
        family_history: 0,
        smoking_family_history: 0,
        stress_immune: 2,
        name: "Alice".to_string(),
    }
}
