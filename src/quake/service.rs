//! Loads the earthquake feed from the configured source.

use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::metrics;

use super::client::CwaClient;
use super::mapper::map_to_simplified;
use super::sample::load_sample;
use super::types::{EarthquakeFeed, FeedSource};

/// Fetches, maps and labels the earthquake feed for one request.
#[derive(Debug, Clone)]
pub struct EarthquakeService {
    config: Config,
    client: Option<CwaClient>,
}

impl EarthquakeService {
    /// Build the service. An API client is created only when a token is set.
    pub fn new(config: Config) -> Result<Self> {
        let client = CwaClient::from_config(&config)?;
        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Source the next request will use.
    pub fn source(&self) -> FeedSource {
        self.config.source()
    }

    /// Record limit for the active source.
    pub fn limit(&self) -> usize {
        self.config.limit()
    }

    /// Load and map the feed.
    #[instrument(skip(self), fields(source = %self.source()))]
    pub async fn load_feed(&self) -> Result<EarthquakeFeed> {
        let source = self.source();
        let limit = self.limit();
        metrics::inc_feed_requests(source);

        let result = self.load(source, limit).await;
        match &result {
            Ok(feed) => info!(count = feed.count, "Loaded earthquake feed"),
            Err(e) => metrics::inc_feed_failures(e.kind()),
        }
        result
    }

    async fn load(&self, source: FeedSource, limit: usize) -> Result<EarthquakeFeed> {
        let doc = match &self.client {
            Some(client) => client.fetch_recent(limit).await?,
            None => load_sample(&self.config.sample_data_path).await?,
        };

        let data = map_to_simplified(&doc, limit)?;
        Ok(EarthquakeFeed::new(source, data))
    }
}
