//! Probability split for the disease / no-disease chart

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySplit {
    pub no_disease: f64,
    pub disease: f64,
    /// Original probability when it had to be clamped into [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamped_from: Option<f64>,
}

impl ProbabilitySplit {
    pub fn is_clamped(&self) -> bool {
        self.clamped_from.is_some()
    }
}

/// Split a probability into its two shares.
///
/// Out-of-range input is clamped for display and logged; the split itself
/// always sums to 1.
pub fn probability_split(probability: f64) -> ProbabilitySplit {
    let disease = clamp_probability(probability);
    let clamped_from = if disease == probability {
        None
    } else {
        tracing::warn!(
            "Probability {} outside [0, 1], displaying as {}",
            probability,
            disease
        );
        Some(probability)
    };

    ProbabilitySplit {
        no_disease: 1.0 - disease,
        disease,
        clamped_from,
    }
}

/// Clamp into [0, 1]; NaN displays as 0
pub fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_in_range() {
        for p in [0.0, 0.001, 0.35, 0.5, 0.6, 0.82, 0.999, 1.0] {
            let split = probability_split(p);
            assert_eq!(split.disease, p);
            assert!((split.no_disease - (1.0 - p)).abs() < 1e-9);
            assert!((split.no_disease + split.disease - 1.0).abs() < 1e-9);
            assert!(!split.is_clamped());
        }
    }

    #[test]
    fn test_split_clamps_out_of_range() {
        let high = probability_split(1.2);
        assert_eq!(high.disease, 1.0);
        assert_eq!(high.no_disease, 0.0);
        assert_eq!(high.clamped_from, Some(1.2));

        let low = probability_split(-0.05);
        assert_eq!(low.disease, 0.0);
        assert_eq!(low.no_disease, 1.0);
        assert_eq!(low.clamped_from, Some(-0.05));
    }

    #[test]
    fn test_split_nan() {
        let split = probability_split(f64::NAN);
        assert_eq!(split.disease, 0.0);
        assert_eq!(split.no_disease, 1.0);
        assert!(split.clamped_from.is_some_and(f64::is_nan));
    }
}
