//! TfL StopPoint listing client.

use serde::{Deserialize, Serialize};

use super::error::StationError;

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default timeout for the bulk listing call, in seconds.
///
/// Deliberately longer than the live crowding timeout: the mode listing is
/// a large response fetched off the render path.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Wrapper for the StopPoint mode listing response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointsResponse {
    pub stop_points: Vec<StopPointDto>,
}

/// Minimal DTO for a stop point - we only need the name and NaPTAN code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointDto {
    pub common_name: String,
    pub naptan_id: String,
}

/// Configuration for the StopPoint client.
#[derive(Debug, Clone)]
pub struct StopPointClientConfig {
    /// TfL application key, sent as the `app_key` query parameter.
    pub app_key: Option<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StopPointClientConfig {
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
}

/// Client for the TfL StopPoint mode listing.
#[derive(Debug, Clone)]
pub struct StopPointClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl StopPointClient {
    /// Create a new StopPoint client.
    pub fn new(config: StopPointClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// Fetch all Tube station stop points.
    pub async fn fetch_tube_stations(&self) -> Result<Vec<StopPointDto>, StationError> {
        let url = format!("{}/StopPoint/Mode/tube", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("stopType", "NaptanMetroStation".to_string()),
            ("useStopPointHierarchy", "false".to_string()),
        ];
        if let Some(key) = &self.app_key {
            query.push(("app_key", key.clone()));
        }

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: StopPointsResponse =
            serde_json::from_str(&body).map_err(|e| StationError::Json {
                message: e.to_string(),
            })?;

        Ok(parsed.stop_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StopPointClientConfig::new(Some("key".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn dto_parses_camel_case() {
        let dto: StopPointDto = serde_json::from_str(
            r#"{"commonName": "Holborn Underground Station", "naptanId": "940GZZLUHBN"}"#,
        )
        .unwrap();
        assert_eq!(dto.common_name, "Holborn Underground Station");
        assert_eq!(dto.naptan_id, "940GZZLUHBN");
    }

    #[test]
    fn response_wrapper_parses() {
        let parsed: StopPointsResponse = serde_json::from_str(
            r#"{"stopPoints": [{"commonName": "Oval Underground Station", "naptanId": "940GZZLUOVL"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.stop_points.len(), 1);
    }
}
