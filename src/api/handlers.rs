//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::presentation::{AreaOrder, DashboardView};
use crate::quake::{EarthquakeFeed, EarthquakeService};

use super::error::ApiError;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Feed loader.
    pub service: Arc<EarthquakeService>,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(service: EarthquakeService) -> Self {
        Self {
            service: Arc::new(service),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Query parameters of the view endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    /// Index of the report to show in the detail panel.
    pub selected: Option<usize>,
    /// Intensity grid order.
    pub order: Option<AreaOrder>,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Earthquake feed handler.
pub async fn earthquakes(State(state): State<AppState>) -> Result<Json<EarthquakeFeed>, ApiError> {
    let feed = state.service.load_feed().await?;
    Ok(Json(feed))
}

/// List/detail view model handler. Failures render the failure view.
pub async fn earthquake_view(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Response {
    match state.service.load_feed().await {
        Ok(feed) => Json(DashboardView::from_feed(
            feed,
            params.selected,
            params.order.unwrap_or_default(),
        ))
        .into_response(),
        Err(e) => {
            error!(error = %e, kind = e.kind(), "ERROR in /api/earthquakes/view");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DashboardView::failure()),
            )
                .into_response()
        }
    }
}

/// Prometheus scrape handler - 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
