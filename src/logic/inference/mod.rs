//! Inference Module - prediction → recommendations workflow
//!
//! This module handles:
//! - Wire types of the prediction / recommendation service
//! - HTTP client (`ServiceClient`)
//! - Session state and the two-step orchestrator

pub mod client;
pub mod orchestrator;
pub mod service;
pub mod session;
pub mod types;


pub use client::{ServiceClient, ServiceConfig};
pub use orchestrator::{InferenceOrchestrator, WorkflowRun};
pub use service::InferenceService;
pub use session::{AcceptedPrediction, RecommendationStatus, WorkflowState};
pub use types::{
    PredictionLabel, PredictionResult, RecommendationRequest, RecommendationResponse, RiskLevel,
};
