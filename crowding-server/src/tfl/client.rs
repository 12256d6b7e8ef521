//! TfL Unified API HTTP client for live crowding data.
//!
//! Live crowding lookups sit on the render path, so they get a short
//! timeout; a stalled upstream should cost a bounded wait, not a hung
//! request.

use crate::domain::StationId;

use super::error::TflError;
use super::types::{CrowdingSample, LiveCrowdingDto};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default timeout for live crowding lookups, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the crowding client.
#[derive(Debug, Clone)]
pub struct CrowdingClientConfig {
    /// TfL application key, sent as the `app_key` query parameter.
    /// Anonymous access works but is aggressively throttled.
    pub app_key: Option<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CrowdingClientConfig {
    /// Create a new config with the given application key.
    pub fn new(app_key: Option<String>) -> Self {
        Self {
            app_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the TfL live crowding endpoint.
#[derive(Debug, Clone)]
pub struct CrowdingClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl CrowdingClient {
    /// Create a new crowding client with the given configuration.
    pub fn new(config: CrowdingClientConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// Fetch the latest crowd level for a station.
    ///
    /// A successful response with `dataAvailable: false` (or a missing
    /// value field) is not an error; it maps to
    /// [`CrowdingSample::Unavailable`]. Transport failures and malformed
    /// bodies are returned as errors for the caller to recover from.
    pub async fn live_crowding(&self, station: &StationId) -> Result<CrowdingSample, TflError> {
        let url = format!("{}/crowding/{}/Live", self.base_url, station);

        let mut request = self.http.get(&url);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let dto: LiveCrowdingDto =
            serde_json::from_str(&body).map_err(|e| TflError::Malformed {
                message: e.to_string(),
            })?;

        Ok(CrowdingSample::from(dto))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CrowdingClientConfig::new(Some("key".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builders() {
        let config = CrowdingClientConfig::new(None)
            .with_base_url("http://localhost:9090")
            .with_timeout(2);
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.timeout_secs, 2);
        assert!(config.app_key.is_none());
    }
}
