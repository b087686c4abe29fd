use axum::http::{header, StatusCode};
use repark::{create_prom_metrics, RunMode};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

mod common;

use common::{test_config, TestApp};

// NOTE: Prometheus metrics use a process-wide recorder. Everything that
// installs it lives in this test binary.

#[tokio::test]
async fn metrics_endpoint_with_prometheus() {
    // ---
    let metrics = create_prom_metrics().expect("Prometheus recorder should install");
    let app = TestApp::with_metrics(
        test_config(RunMode::Development, PathBuf::from("build"), Duration::from_secs(60)),
        metrics,
    );

    app.signup("Thrain", "map").await;
    let response = app
        .post_json("/api/parking", json!({ "longitude": 3.0, "latitude": 4.0 }), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let _ = app.get("/health").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.headers.get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));

    let body = response.text();
    assert!(body.contains("repark_users_created_total"), "{body}");
    assert!(body.contains("repark_spots_created_total"), "{body}");
    assert!(body.contains("http_request_duration_seconds"), "{body}");
}

#[tokio::test]
async fn metrics_endpoint_with_noop() {
    // ---
    let app = TestApp::new();

    let _ = app.get("/health").await;
    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().is_empty());
}
