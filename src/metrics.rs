//! Prometheus metrics for feed requests and upstream latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::quake::types::FeedSource;

// === Metric Name Constants ===

/// Feed requests counter metric name.
pub const METRIC_FEED_REQUESTS: &str = "feed_requests_total";
/// Feed failures counter metric name.
pub const METRIC_FEED_FAILURES: &str = "feed_failures_total";
/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Upstream latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Register metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_FEED_REQUESTS,
        "Total number of earthquake feed loads, by source"
    );
    describe_counter!(
        METRIC_FEED_FAILURES,
        "Total number of failed earthquake feed loads, by error kind"
    );
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of requests sent to the CWA API"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "CWA API request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment feed requests counter.
pub fn inc_feed_requests(source: FeedSource) {
    counter!(METRIC_FEED_REQUESTS, "source" => source.to_string()).increment(1);
}

/// Increment feed failures counter.
pub fn inc_feed_failures(kind: &'static str) {
    counter!(METRIC_FEED_FAILURES, "kind" => kind).increment(1);
}

/// Increment upstream requests counter.
pub fn inc_upstream_requests() {
    counter!(METRIC_UPSTREAM_REQUESTS).increment(1);
}

/// Record upstream request latency.
pub fn record_upstream_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY).record(latency_ms);
}
