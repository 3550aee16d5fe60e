//! Inference Orchestrator
//!
//! Runs the two dependent calls of one submission as a single unit:
//!
//! 1. prediction (`/predict` or `/latest-prediction`)
//! 2. recommendations, derived from the prediction's attribution and risk level
//!
//! Each run takes a new generation. Every write to the session first checks
//! that the run's generation is still current, so a run that was superseded
//! (new submission, or the view was torn down) can never overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::Instrument;
use uuid::Uuid;

use super::service::InferenceService;
use super::session::{AcceptedPrediction, Session, WorkflowState};
use super::types::{PredictionResult, RecommendationRequest};
use crate::error::{PredictionError, RecommendationError, ServiceError, ValidationError};
use crate::logic::analytics::{integrity, DerivedViews};
use crate::logic::features::{encode, FeatureVector, RawFormInput};

/// Result of one workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRun {
    pub generation: u64,
    /// The run's own final state (applied to the session unless superseded)
    pub state: WorkflowState,
    /// A newer run or `invalidate` started first; nothing was applied
    pub superseded: bool,
}

/// Where step 1 gets its prediction from
enum PredictionSource {
    Submit(FeatureVector),
    Latest,
}

pub struct InferenceOrchestrator<S> {
    service: S,
    session: RwLock<Session>,
    generation: AtomicU64,
}

impl<S: InferenceService> InferenceOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            session: RwLock::new(Session::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> WorkflowState {
        self.session.read().state.clone()
    }

    /// Generation of the run that wrote the current state
    #[cfg(test)]
    pub(crate) fn applied_generation(&self) -> u64 {
        self.session.read().generation
    }

    /// Generation of the most recently started run
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Views for the current prediction, recomputed on every call
    pub fn derived_views(&self) -> Option<DerivedViews> {
        let prediction = self.session.read().state.prediction().cloned()?;
        Some(DerivedViews::from_prediction(&prediction))
    }

    /// Drop whatever is in flight and reset to `Idle` (view torn down)
    pub fn invalidate(&self) {
        // Bump under the lock so no run can apply between the bump and the reset
        let mut session = self.session.write();
        let generation = self.next_generation();
        session.generation = generation;
        session.state = WorkflowState::Idle;
        tracing::debug!("Session invalidated at generation {}", generation);
    }

    /// Encode the form, then run the workflow.
    ///
    /// An invalid form touches neither the session nor the network.
    pub async fn submit(&self, raw: &RawFormInput) -> Result<WorkflowRun, ValidationError> {
        let features = encode(raw)?;
        Ok(self.run(features).await)
    }

    /// Full workflow for a new submission
    pub async fn run(&self, features: FeatureVector) -> WorkflowRun {
        self.execute(PredictionSource::Submit(features)).await
    }

    /// Workflow starting from the session's latest stored prediction
    pub async fn load_latest(&self) -> WorkflowRun {
        self.execute(PredictionSource::Latest).await
    }

    async fn execute(&self, source: PredictionSource) -> WorkflowRun {
        let generation = self.next_generation();
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("workflow", %run_id, generation);

        self.saga(generation, source).instrument(span).await
    }

    async fn saga(&self, generation: u64, source: PredictionSource) -> WorkflowRun {
        if !self.apply(generation, WorkflowState::Pending) {
            return self.superseded(generation, WorkflowState::Pending);
        }

        // Step 1: prediction
        let prediction = match self.fetch_prediction(source).await {
            Ok(prediction) => prediction,
            Err(error) => {
                tracing::warn!("Prediction failed: {}", error);
                return self.finish(generation, WorkflowState::Failed(error));
            }
        };

        let accepted = AcceptedPrediction {
            warnings: integrity::inspect_and_log(&prediction),
            result: Arc::new(prediction),
            received_at: Utc::now(),
        };
        tracing::info!(
            "Prediction received: {} (p={:.3}, risk={})",
            accepted.result.prediction.as_str(),
            accepted.result.probability,
            accepted.result.risk_level
        );

        let fetched = WorkflowState::PredictionFetched { prediction: accepted.clone() };
        if !self.apply(generation, fetched.clone()) {
            // Stale before step 2: skip the recommendation call entirely
            return self.superseded(generation, fetched);
        }

        // Step 2: recommendations, from the prediction alone
        let request = RecommendationRequest::from_prediction(&accepted.result);
        let state = match self.service.recommendations(&request).await {
            Ok(recommendations) => {
                tracing::info!("Received {} recommendation(s)", recommendations.len());
                WorkflowState::Complete { prediction: accepted, recommendations }
            }
            Err(error) => {
                let error = RecommendationError(error);
                tracing::warn!("{}; keeping prediction", error);
                WorkflowState::PartialSuccess { prediction: accepted, error }
            }
        };

        self.finish(generation, state)
    }

    async fn fetch_prediction(
        &self,
        source: PredictionSource,
    ) -> Result<PredictionResult, PredictionError> {
        match source {
            PredictionSource::Submit(features) => {
                // The vector is consumed by this call and dropped with it
                Ok(self.service.predict(&features).await?)
            }
            PredictionSource::Latest => match self.service.latest_prediction().await {
                Ok(prediction) => Ok(prediction),
                Err(ServiceError::Status { status: 404, .. }) => {
                    Err(PredictionError::NoPriorPrediction)
                }
                Err(error) => Err(error.into()),
            },
        }
    }

    fn finish(&self, generation: u64, state: WorkflowState) -> WorkflowRun {
        if self.apply(generation, state.clone()) {
            tracing::debug!("Workflow finished: {}", state.name());
            WorkflowRun { generation, state, superseded: false }
        } else {
            self.superseded(generation, state)
        }
    }

    fn superseded(&self, generation: u64, state: WorkflowState) -> WorkflowRun {
        tracing::debug!(
            "Discarding {} result of superseded run (current generation {})",
            state.name(),
            self.generation()
        );
        WorkflowRun { generation, state, superseded: true }
    }

    /// Write `state` if `generation` is still the newest run
    fn apply(&self, generation: u64, state: WorkflowState) -> bool {
        let mut session = self.session.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        tracing::trace!(
            "Session {}@{} -> {}@{}",
            session.state.name(),
            session.generation,
            state.name(),
            generation
        );
        session.generation = generation;
        session.state = state;
        true
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}
