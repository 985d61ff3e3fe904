//! Unified error types for the earthquake feed.

use thiserror::Error;

/// Unified error type for loading the earthquake feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Upstream answered with a non-success status.
    #[error("CWA API error {status}")]
    UpstreamStatus {
        /// HTTP status returned by the upstream.
        status: u16,
    },

    /// Upstream did not answer within the configured budget.
    #[error("upstream timed out after {timeout_ms}ms")]
    UpstreamTimeout {
        /// The budget that was exceeded.
        timeout_ms: u64,
    },

    /// Upstream unreachable or the transfer broke off.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body or fixture is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sample fixture could not be read.
    #[error("failed to read sample data {path}: {source}")]
    SampleRead {
        /// Fixture path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Document parsed but does not have the expected shape.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),
}

impl FeedError {
    /// Short label used for the failure metric.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Config(_) => "config",
            FeedError::UpstreamStatus { .. } => "upstream_status",
            FeedError::UpstreamTimeout { .. } => "upstream_timeout",
            FeedError::Http(_) => "http",
            FeedError::Json(_) => "json",
            FeedError::SampleRead { .. } => "sample_read",
            FeedError::Mapping(_) => "mapping",
        }
    }
}

/// Shape errors raised while flattening an upstream document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The record list exists but is not an array.
    #[error("{path} is not a list")]
    NotAList {
        /// Location of the offending value.
        path: &'static str,
    },

    /// A record could not be read as an earthquake report.
    #[error("record {index} is malformed: {reason}")]
    BadRecord {
        /// Position of the record in the upstream list.
        index: usize,
        /// Decoder message.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, FeedError>;
