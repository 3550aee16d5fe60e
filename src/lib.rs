//! Pulmonary Risk Dashboard - client-side core
//!
//! Turns an intake form into a risk prediction, rule-based recommendations and
//! the attribution views the dashboard renders.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   FeatureVector   ┌──────────────────────────┐
//! │  Intake form │ ────────────────▶ │  InferenceOrchestrator   │
//! │  (encoder)   │                   │  1. POST /predict        │
//! └──────────────┘                   │  2. POST /recommendations│
//!                                    └────────────┬─────────────┘
//!                                                 │ PredictionResult
//!                                                 ▼
//!                                    ┌──────────────────────────┐
//!                                    │  Attribution analytics   │
//!                                    │  ranked / cumulative /   │
//!                                    │  probability split       │
//!                                    └──────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod logic;

pub use config::DashboardConfig;
pub use error::{
    FieldIssue, FieldProblem, PredictionError, RecommendationError, ServiceError, ValidationError,
};
pub use logic::analytics::{
    cumulative_attribution, probability_split, ranked_attribution, AttributionEntry,
    AttributionMapping, CumulativeEntry, DataIntegrityWarning, DerivedViews, PredictionSummary,
    ProbabilitySplit,
};
pub use logic::features::{encode, FeatureVector, FormValue, RawFormInput};
pub use logic::inference::{
    InferenceOrchestrator, InferenceService, PredictionLabel, PredictionResult, RecommendationRequest,
    RecommendationStatus, RiskLevel, ServiceClient, ServiceConfig, WorkflowRun, WorkflowState,
};
