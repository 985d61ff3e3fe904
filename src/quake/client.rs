//! CWA open-data API client.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::FeedError;
use crate::metrics;

/// Client for the CWA earthquake report dataset.
#[derive(Debug, Clone)]
pub struct CwaClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Dataset endpoint.
    url: String,
    /// Authorization token.
    token: String,
    /// Total request budget in milliseconds.
    timeout_ms: u64,
}

impl CwaClient {
    /// Create a client with a bounded request timeout.
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .connect_timeout(Duration::from_millis(config.upstream_timeout_ms.min(3_000)))
            .build()?;

        Ok(Self {
            http,
            url: config.upstream_url.clone(),
            token: token.into(),
            timeout_ms: config.upstream_timeout_ms,
        })
    }

    /// Create a client from config, if a token is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, FeedError> {
        config
            .token()
            .map(|token| Self::new(config, token))
            .transpose()
    }

    /// Get the dataset endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the most recent `limit` reports as a raw document.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_recent(&self, limit: usize) -> Result<Value, FeedError> {
        let start = Instant::now();
        metrics::inc_upstream_requests();

        let result = self.send(limit).await;
        metrics::record_upstream_latency(start);

        if let Err(e) = &result {
            warn!(error = %e, "Upstream request failed");
        }
        result
    }

    async fn send(&self, limit: usize) -> Result<Value, FeedError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(&self.url)
            .query(&[("Authorization", self.token.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(bytes = body.len(), "Received upstream document");

        Ok(serde_json::from_slice(&body)?)
    }

    fn classify(&self, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            FeedError::UpstreamTimeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            // The request URL carries the token.
            FeedError::Http(error.without_url())
        }
    }
}
