//! Seam between the orchestrator and the remote services

use std::future::Future;

use super::types::{PredictionResult, RecommendationRequest};
use crate::error::ServiceError;
use crate::logic::features::FeatureVector;

/// The three remote operations the workflow needs.
///
/// Futures are `Send` so a workflow can run on a spawned task.
pub trait InferenceService: Send + Sync {
    /// `POST /predict`
    fn predict(
        &self,
        features: &FeatureVector,
    ) -> impl Future<Output = Result<PredictionResult, ServiceError>> + Send;

    /// `GET /latest-prediction`
    fn latest_prediction(
        &self,
    ) -> impl Future<Output = Result<PredictionResult, ServiceError>> + Send;

    /// `POST /recommendations`
    fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> impl Future<Output = Result<Vec<String>, ServiceError>> + Send;
}
