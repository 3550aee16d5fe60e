//! Inference Service Client
//!
//! HTTP client for the prediction / recommendation service.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::service::InferenceService;
use super::types::{
    ErrorResponse, PredictionResult, RecommendationRequest, RecommendationResponse,
};
use crate::error::ServiceError;
use crate::logic::features::FeatureVector;

/// Service endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        crate::config::DashboardConfig::default().service_config()
    }
}

/// reqwest-backed [`InferenceService`]
#[derive(Debug, Clone)]
pub struct ServiceClient {
    config: ServiceConfig,
    http_client: reqwest::Client,
}

impl ServiceClient {
    /// Create new service client
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Submit a feature vector to `/predict`
    pub async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, ServiceError> {
        let url = self.url("/predict");
        tracing::debug!("POST {}", url);

        let response = self.http_client.post(&url).json(features).send().await?;

        decode(response).await
    }

    /// Fetch the session's most recent prediction
    pub async fn latest_prediction(&self) -> Result<PredictionResult, ServiceError> {
        let url = self.url("/latest-prediction");
        tracing::debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;

        decode(response).await
    }

    /// Ask the rule engine for recommendations
    pub async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<String>, ServiceError> {
        let url = self.url("/recommendations");
        tracing::debug!("POST {} (risk_level={})", url, request.risk_level);

        let response = self.http_client.post(&url).json(request).send().await?;

        let body: RecommendationResponse = decode(response).await?;
        Ok(body.recommendations)
    }
}

impl InferenceService for ServiceClient {
    async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, ServiceError> {
        ServiceClient::predict(self, features).await
    }

    async fn latest_prediction(&self) -> Result<PredictionResult, ServiceError> {
        ServiceClient::latest_prediction(self).await
    }

    async fn recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<String>, ServiceError> {
        ServiceClient::recommendations(self, request).await
    }
}

/// Check status, then parse the body as `T`
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        tracing::warn!("Service error ({}): {}", status.as_u16(), message);
        Err(ServiceError::Status { status: status.as_u16(), message })
    }
}
