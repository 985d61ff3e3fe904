//! Integration tests for the earthquake feed server.
//!
//! Most tests drive the full router against the bundled sample or a local
//! mock upstream. The live API test needs a real API_TOKEN:
//! Run with: cargo test --test integration -- --ignored

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use quake_feed::api::{create_router, AppState};
use quake_feed::config::Config;
use quake_feed::quake::{EarthquakeService, MockConfig, MockUpstream};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sample_data.json");
const PUBLIC: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

fn sample_config() -> Config {
    Config {
        sample_data_path: SAMPLE.to_string(),
        static_dir: PUBLIC.to_string(),
        ..Config::default()
    }
}

fn api_config(mock: &MockUpstream) -> Config {
    Config {
        api_token: Some("test-token".to_string()),
        upstream_url: mock.url(),
        upstream_timeout_ms: 500,
        ..sample_config()
    }
}

fn router(config: Config) -> Router {
    create_router(AppState::new(EarthquakeService::new(config).unwrap()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response: Response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn upstream_document(count: usize) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "EarthquakeNo": 113000 + i,
                "ReportContent": format!("report {}", i),
                "EarthquakeInfo": {
                    "OriginTime": "2024-04-03 07:58:09",
                    "EarthquakeMagnitude": { "MagnitudeType": "芮氏規模", "MagnitudeValue": 4.2 }
                },
                "Intensity": { "ShakingArea": [
                    { "CountyName": "Taipei", "AreaDesc": "A", "AreaIntensity": 4 },
                    { "CountyName": "Taipei", "AreaDesc": "A", "AreaIntensity": 4 },
                    { "CountyName": "Taipei", "AreaDesc": "A", "AreaIntensity": 3 }
                ] }
            })
        })
        .collect();
    json!({ "success": "true", "records": { "Earthquake": records } })
}

#[tokio::test]
async fn no_token_serves_sample() {
    let (status, body) = get(router(sample_config()), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "sample");
    assert_eq!(body["count"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["EarthquakeNo"], 113200);
}

#[tokio::test]
async fn sample_keeps_duplicate_areas_in_data() {
    let (_, body) = get(router(sample_config()), "/api/earthquakes").await;
    let areas = body["data"][0]["IntensityAreas"].as_array().unwrap();
    assert_eq!(areas.len(), 6);
}

#[tokio::test]
async fn sample_record_without_magnitude_has_nulls() {
    let (_, body) = get(router(sample_config()), "/api/earthquakes").await;
    let record = &body["data"][2];
    assert!(record["MagnitudeValue"].is_null());
    assert!(record["MagnitudeType"].is_null());
}

#[tokio::test]
async fn token_fetches_from_upstream() {
    let mock = MockUpstream::start(MockConfig::json(&upstream_document(12)))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "api");
    assert_eq!(body["count"], 10);
    assert_eq!(body["data"][0]["EarthquakeNo"], 113000);
    assert_eq!(body["data"][0]["MagnitudeValue"], 4.2);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["Authorization"], "test-token");
    assert_eq!(requests[0]["limit"], "10");
}

#[tokio::test]
async fn upstream_503_is_a_500_without_data() {
    let mock = MockUpstream::start(MockConfig::default().with_status(503))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load earthquake data");
    assert!(body["message"].as_str().unwrap().contains("503"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn upstream_timeout_is_reported() {
    let mock = MockUpstream::start(MockConfig::default().with_delay(2_000))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "upstream timed out after 500ms");
}

#[tokio::test]
async fn upstream_without_records_is_empty() {
    let mock = MockUpstream::start(MockConfig::json(&json!({ "success": "true" })))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn malformed_record_list_is_a_500() {
    let doc = json!({ "records": { "Earthquake": "not a list" } });
    let mock = MockUpstream::start(MockConfig::json(&doc)).await.unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "mapping error: records.Earthquake is not a list"
    );
}

#[tokio::test]
async fn missing_sample_file_is_a_500() {
    let config = Config {
        sample_data_path: "does/not/exist.json".to_string(),
        ..sample_config()
    };
    let (status, body) = get(router(config), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("failed to read sample data"));
}

#[tokio::test]
async fn view_deduplicates_areas_for_display() {
    let mock = MockUpstream::start(MockConfig::json(&upstream_document(2)))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes/view").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_label"], "資料來源：中央氣象署 API（最近 2 筆）");
    assert_eq!(body["items"][0]["label"], "113000｜芮氏規模 4.2｜2024-04-03 07:58:09");
    assert_eq!(body["items"][0]["selected"], true);
    assert_eq!(
        body["detail"]["areas"],
        json!([
            { "CountyName": "Taipei", "AreaDesc": "A", "AreaIntensity": 4 },
            { "CountyName": "Taipei", "AreaDesc": "A", "AreaIntensity": 3 }
        ])
    );
}

#[tokio::test]
async fn view_of_sample_shows_placeholder_magnitude() {
    let (status, body) = get(router(sample_config()), "/api/earthquakes/view?selected=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_label"], "資料來源：範例資料");
    assert!(body["items"][2]["label"]
        .as_str()
        .unwrap()
        .contains("芮氏規模 ?"));
    assert_eq!(body["detail"]["id"], "113198");
}

#[tokio::test]
async fn view_orders_by_intensity_on_request() {
    let (_, body) = get(
        router(sample_config()),
        "/api/earthquakes/view?selected=0&order=intensity",
    )
    .await;
    let areas = body["detail"]["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 5);
    assert_eq!(areas[0]["CountyName"], "花蓮縣");
}

#[tokio::test]
async fn view_failure_shows_fixed_message() {
    let mock = MockUpstream::start(MockConfig::default().with_status(503))
        .await
        .unwrap();
    let (status, body) = get(router(api_config(&mock)), "/api/earthquakes/view").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "載入資料失敗");
    assert_eq!(body["items"], json!([]));
    assert!(body["detail"].is_null());
}

#[tokio::test]
async fn metrics_endpoint_renders_when_enabled() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::new(EarthquakeService::new(sample_config()).unwrap()).with_metrics(handle);

    let response = create_router(state)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn static_assets_are_served() {
    let response = router(sample_config())
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Test against the real CWA API.
#[tokio::test]
#[ignore = "requires API_TOKEN and network access"]
async fn live_api_returns_recent_reports() {
    dotenvy::dotenv().ok();
    let token = match std::env::var("API_TOKEN") {
        Ok(t) if !t.trim().is_empty() => t,
        _ => {
            println!("Skipping: API_TOKEN not set");
            return;
        }
    };

    let config = Config {
        api_token: Some(token),
        ..sample_config()
    };
    let (status, body) = get(router(config), "/api/earthquakes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "api");
    assert!(body["count"].as_u64().unwrap() <= 10);
    println!("Received {} reports", body["count"]);
}
