use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::config::{NetworkConfig, PredictionConfig, TrendsConfig};
use crate::prediction::PredictionRequest;
use crate::traits::{PredictionSource, TrendsSource};

/// Failures where no usable response body was obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("Failed to parse response body: {0}")]
    Decode(String),
}

/// A completed exchange with a parking service, whatever its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-supplied `message` on success.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Server-supplied `error` on failure.
    pub fn error(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// How a service is told which parking zones to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaKey {
    /// A single zone number, e.g. `7539`.
    Zone(String),
    /// A street name the service resolves to its mapped zones.
    Street(String),
}

impl AreaKey {
    /// Query parameter name.
    pub fn param(&self) -> &'static str {
        match self {
            AreaKey::Zone(_) => "zone",
            AreaKey::Street(_) => "street",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            AreaKey::Zone(v) | AreaKey::Street(v) => v,
        }
    }
}

impl std::fmt::Display for AreaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaKey::Zone(zone) => write!(f, "zone {}", zone),
            AreaKey::Street(street) => f.write_str(street),
        }
    }
}

fn build_http_client(network_config: &NetworkConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(network_config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout_secs))
        .build()
        .context("Failed to create HTTP client")
}

/// GET `endpoint` with `query` and parse the body as JSON whatever the status.
async fn get_json(
    client: &reqwest::Client,
    endpoint: &str,
    query: &[(&str, &str)],
) -> Result<ApiReply, ApiError> {
    tracing::debug!("GET {} {:?}", endpoint, query);

    let response = client
        .get(endpoint)
        .query(query)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Request to {} failed: {}", endpoint, e);
            ApiError::Transport(e.to_string())
        })?;

    let status = response.status();
    tracing::debug!("{} answered {}", endpoint, status);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let body =
        serde_json::from_slice::<Value>(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(ApiReply::new(status.as_u16(), body))
}


/// HTTP client for the historical trends endpoint.
#[derive(Clone, Debug)]
pub struct TrendsApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TrendsApiClient {
    /// Create a new API client with configurable timeouts.
    pub fn new(trends: &TrendsConfig, network_config: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(network_config)?,
            endpoint: trends.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch historical trends for a zone or street. Non-success statuses are returned, not raised.
    pub async fn fetch_trends(&self, area: &AreaKey) -> Result<ApiReply, ApiError> {
        get_json(&self.client, &self.endpoint, &[(area.param(), area.value())]).await
    }
}

impl TrendsSource for TrendsApiClient {
    async fn fetch_trends(&self, area: &AreaKey) -> Result<ApiReply, ApiError> {
        TrendsApiClient::fetch_trends(self, area).await
    }
}

/// HTTP client for the optional availability prediction endpoint.
#[derive(Clone, Debug)]
pub struct PredictionApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PredictionApiClient {
    /// Returns `Ok(None)` when no prediction service is configured.
    pub fn from_config(
        prediction: &PredictionConfig,
        network_config: &NetworkConfig,
    ) -> Result<Option<Self>> {
        let Some(endpoint) = prediction.endpoint() else {
            return Ok(None);
        };
        Ok(Some(Self {
            client: build_http_client(network_config)?,
            endpoint,
        }))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask for a prediction at `request.time`. Non-success statuses are returned, not raised.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<ApiReply, ApiError> {
        let query = [
            ("time", request.time.as_str()),
            (request.area.param(), request.area.value()),
        ];
        get_json(&self.client, &self.endpoint, &query).await
    }
}

impl PredictionSource for PredictionApiClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<ApiReply, ApiError> {
        PredictionApiClient::predict(self, request).await
    }
}
