//! HTTP API route definitions.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::handlers::{earthquake_view, earthquakes, health, metrics, AppState};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.service.config().static_dir.clone();

    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Earthquake feed
        .route("/api/earthquakes", get(earthquakes))
        .route("/api/earthquakes/view", get(earthquake_view))
        // Prometheus scrape
        .route("/metrics", get(metrics))
        // Browser client; unknown paths get the page shell
        .fallback_service(static_files(&static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve files from `dir`, answering misses with `dir/index.html`.
pub fn static_files(dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(dir).join("index.html");
    ServeDir::new(dir).fallback(ServeFile::new(index))
}
