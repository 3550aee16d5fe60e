//! Error handling
//!
//! Error taxonomy of the dashboard core:
//! - [`ValidationError`] - intake form could not be encoded, raised before any network call
//! - [`ServiceError`] - transport-level failure talking to a remote service
//! - [`PredictionError`] - step 1 of the workflow failed; fatal for the run
//! - [`RecommendationError`] - step 2 failed; the prediction is kept
//!
//! Data integrity anomalies are not errors; see `logic::analytics::integrity`.

use std::fmt;

/// One offending intake field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: FieldProblem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// Required field absent or empty
    Missing,
    /// Present but not coercible to the field's type
    NotCoercible { expected: &'static str, found: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::Missing => write!(f, "{} is required", self.field),
            FieldProblem::NotCoercible { expected, found } => {
                write!(f, "{} must be {}, got {:?}", self.field, expected, found)
            }
        }
    }
}

/// Intake form rejected by the encoder. Lists every offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid intake form: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.issues.iter().map(|issue| issue.field)
    }

    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Remote service call errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("service responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Malformed(err.to_string())
    }
}

/// Step 1 failure. No recommendation call follows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction failed: {0}")]
    Service(#[from] ServiceError),

    #[error("no prediction available for this session yet")]
    NoPriorPrediction,
}

/// Step 2 failure. The prediction obtained in step 1 stays valid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("recommendations unavailable: {0}")]
pub struct RecommendationError(#[from] pub ServiceError);
