//! Dashboard session state
//!
//! ```text
//! Idle ─▶ Pending ─┬─▶ PredictionFetched ─┬─▶ Complete
//!                  │                      └─▶ PartialSuccess
//!                  └─▶ Failed
//! ```
//!
//! A new run always restarts from `Pending`; nothing from the previous run
//! is carried over.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::PredictionResult;
use crate::error::{PredictionError, RecommendationError};
use crate::logic::analytics::DataIntegrityWarning;

/// A prediction accepted into the session
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedPrediction {
    pub result: Arc<PredictionResult>,
    pub received_at: DateTime<Utc>,
    pub warnings: Vec<DataIntegrityWarning>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    /// Nothing submitted yet (or the view was torn down)
    #[default]
    Idle,
    /// Waiting for the prediction
    Pending,
    /// Prediction held, recommendations in flight
    PredictionFetched { prediction: AcceptedPrediction },
    Complete {
        prediction: AcceptedPrediction,
        recommendations: Vec<String>,
    },
    /// Prediction held, recommendations failed
    PartialSuccess {
        prediction: AcceptedPrediction,
        error: RecommendationError,
    },
    /// No prediction at all
    Failed(PredictionError),
}

/// What the recommendations panel should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    NotRequested,
    Loading,
    Ready,
    Unavailable,
}

impl WorkflowState {
    pub fn accepted(&self) -> Option<&AcceptedPrediction> {
        match self {
            WorkflowState::PredictionFetched { prediction }
            | WorkflowState::Complete { prediction, .. }
            | WorkflowState::PartialSuccess { prediction, .. } => Some(prediction),
            _ => None,
        }
    }

    pub fn prediction(&self) -> Option<&Arc<PredictionResult>> {
        self.accepted().map(|accepted| &accepted.result)
    }

    /// Empty unless the workflow completed
    pub fn recommendations(&self) -> &[String] {
        match self {
            WorkflowState::Complete { recommendations, .. } => recommendations,
            _ => &[],
        }
    }

    pub fn recommendation_status(&self) -> RecommendationStatus {
        match self {
            WorkflowState::Idle | WorkflowState::Failed(_) => RecommendationStatus::NotRequested,
            WorkflowState::Pending | WorkflowState::PredictionFetched { .. } => {
                RecommendationStatus::Loading
            }
            WorkflowState::Complete { .. } => RecommendationStatus::Ready,
            WorkflowState::PartialSuccess { .. } => RecommendationStatus::Unavailable,
        }
    }

    pub fn prediction_error(&self) -> Option<&PredictionError> {
        match self {
            WorkflowState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn recommendation_error(&self) -> Option<&RecommendationError> {
        match self {
            WorkflowState::PartialSuccess { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Complete, PartialSuccess or Failed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Complete { .. }
                | WorkflowState::PartialSuccess { .. }
                | WorkflowState::Failed(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Pending => "pending",
            WorkflowState::PredictionFetched { .. } => "prediction_fetched",
            WorkflowState::Complete { .. } => "complete",
            WorkflowState::PartialSuccess { .. } => "partial_success",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

/// Session state stamped with the generation that wrote it
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub generation: u64,
    pub state: WorkflowState,
}
