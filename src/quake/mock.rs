//! Local stand-in for the CWA API, for tests.
//!
//! Serves a fixed response from a loopback port so the real client code
//! path can be exercised without network access.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Dataset path served by the mock, mirroring the real endpoint.
pub const MOCK_DATASET_PATH: &str = "/api/v1/rest/datastore/E-A0015-001";

/// Response the mock upstream returns.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// HTTP status to answer with.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Delay before answering.
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            status: 200,
            body: "{}".to_string(),
            delay_ms: 0,
        }
    }
}

impl MockConfig {
    /// Answer 200 with the given document.
    pub fn json(doc: &Value) -> Self {
        Self {
            body: doc.to_string(),
            ..Self::default()
        }
    }

    /// Answer with the given status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Answer with a raw, possibly malformed, body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Wait before answering.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

#[derive(Clone)]
struct MockState {
    config: Arc<MockConfig>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Running mock upstream. Shuts down when dropped.
pub struct MockUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    /// Bind a loopback port and start serving.
    pub async fn start(config: MockConfig) -> std::io::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            config: Arc::new(config),
            requests: requests.clone(),
        };

        let router = Router::new()
            .route(MOCK_DATASET_PATH, get(dataset))
            .with_state(state);

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    /// Dataset URL to point the client at.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, MOCK_DATASET_PATH)
    }

    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn dataset(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(params);

    if state.config.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.delay_ms)).await;
    }

    let status =
        StatusCode::from_u16(state.config.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        state.config.body.clone(),
    )
}
