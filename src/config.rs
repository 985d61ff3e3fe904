//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

use crate::quake::types::FeedSource;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Upstream Feed ===
    /// CWA open-data authorization token. Without it the bundled sample is served.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Earthquake report dataset endpoint.
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Total time budget for one upstream request.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Records requested from the live API.
    #[serde(default = "default_api_limit")]
    pub api_limit: usize,

    // === Sample Data ===
    /// Bundled fixture in the upstream format.
    #[serde(default = "default_sample_data_path")]
    pub sample_data_path: String,

    /// Records taken from the fixture.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the browser client.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Expose Prometheus metrics on `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_upstream_url() -> String {
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore/E-A0015-001".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    10_000
}

fn default_api_limit() -> usize {
    10
}

fn default_sample_data_path() -> String {
    "sample_data.json".to_string()
}

fn default_sample_limit() -> usize {
    5
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            upstream_url: default_upstream_url(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            api_limit: default_api_limit(),
            sample_data_path: default_sample_data_path(),
            sample_limit: default_sample_limit(),
            port: default_port(),
            static_dir: default_static_dir(),
            metrics_enabled: true,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_limit == 0 {
            return Err("API_LIMIT must be at least 1".to_string());
        }

        if self.sample_limit == 0 {
            return Err("SAMPLE_LIMIT must be at least 1".to_string());
        }

        if self.upstream_timeout_ms == 0 {
            return Err("UPSTREAM_TIMEOUT_MS must be greater than 0".to_string());
        }

        match Url::parse(&self.upstream_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!(
                    "UPSTREAM_URL must use http or https, got {}",
                    url.scheme()
                ))
            }
            Err(e) => return Err(format!("UPSTREAM_URL is not a valid URL: {}", e)),
        }

        if self.static_dir.trim().is_empty() {
            return Err("STATIC_DIR must not be empty".to_string());
        }

        Ok(())
    }

    /// The configured token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Tracing filter directives: debug for this crate when verbose, `RUST_LOG` otherwise.
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose || self.verbose {
            "quake_feed=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Which feed a request will be served from.
    pub fn source(&self) -> FeedSource {
        if self.token().is_some() {
            FeedSource::Api
        } else {
            FeedSource::Sample
        }
    }

    /// Record limit for the active source.
    pub fn limit(&self) -> usize {
        match self.source() {
            FeedSource::Api => self.api_limit,
            FeedSource::Sample => self.sample_limit,
        }
    }

    /// Token with all but the last four characters hidden, for display.
    pub fn masked_token(&self) -> Option<String> {
        self.token().map(|t| {
            let chars: Vec<char> = t.chars().collect();
            let visible = chars.len().saturating_sub(4);
            let tail: String = chars[visible..].iter().collect();
            format!("{}{}", "*".repeat(visible), tail)
        })
    }
}
