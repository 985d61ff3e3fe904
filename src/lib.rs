//! Recent earthquake reports for a browser client.
//!
//! Reports come from the CWA open-data API when a token is configured and
//! from a bundled sample file otherwise. The nested upstream document is
//! flattened into simplified records and served as JSON, alongside a
//! list/detail view model and the static page that paints it.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`quake`]: Upstream client, sample fallback and record mapping
//! - [`presentation`]: Intensity-area deduplication and the page view model
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod presentation;
pub mod quake;
pub mod utils;

pub use config::Config;
pub use error::{FeedError, MappingError, Result};
