//! Configuration module

use std::env;

use crate::logic::inference::ServiceConfig;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the prediction / recommendation service
    pub service_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DashboardConfig {
    /// Apply a `.env` file (if any), then read the environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_url: lookup("PREDICTION_SERVICE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),

            timeout_secs: lookup("SERVICE_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// HTTP client settings derived from this configuration
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.service_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_reads_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("PREDICTION_SERVICE_URL", "http://risk.internal:8000"),
            ("SERVICE_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.service_url, "http://risk.internal:8000");
        assert_eq!(config.timeout_secs, 5);

        let service = config.service_config();
        assert_eq!(service.base_url, "http://risk.internal:8000");
        assert_eq!(service.timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = DashboardConfig::from_lookup(lookup(&[("SERVICE_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout_secs, 30);

        let config = DashboardConfig::from_lookup(lookup(&[("SERVICE_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout_secs, 30);
    }
}
