//! Earthquake feed module.
//!
//! This module handles:
//! - Upstream and client-facing report types
//! - Mapping the upstream document to simplified records
//! - CWA API client and the bundled sample fallback
//! - Mock upstream for testing

pub mod client;
pub mod mapper;
pub mod mock;
pub mod sample;
pub mod service;
pub mod types;

pub use client::CwaClient;
pub use mapper::{map_to_simplified, map_to_simplified_or_empty};
pub use mock::{MockConfig, MockUpstream};
pub use service::EarthquakeService;
pub use types::{EarthquakeFeed, FeedSource, IntensityArea, Scalar, SimplifiedEarthquake};
