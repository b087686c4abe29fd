//! Integration tests for the session gate in front of `/index`.

use axum::http::StatusCode;
use repark::{RunMode, NOT_LOGGED_IN};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

mod common;

use common::{TestApp, TEST_SHELL};

#[tokio::test]
async fn missing_cookie_never_reaches_handler() {
    // ---
    let app = TestApp::new();

    let response = app.get("/index").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json(), json!({ "err": NOT_LOGGED_IN }));
    assert!(!response.text().contains(TEST_SHELL));
}

#[tokio::test]
async fn unknown_or_malformed_cookie_is_rejected() {
    // ---
    let app = TestApp::new();

    for cookie in [
        "ssid=",
        "ssid=garbage",
        "ssid=1b4e28ba-2fa1-11d2-883f-0016d3cca427",
        "other=value",
    ] {
        let response = app.get_with_cookie("/index", cookie).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "cookie: {cookie}");
        assert_eq!(response.json()["err"], NOT_LOGGED_IN);
    }
}

#[tokio::test]
async fn live_session_gets_client_shell() {
    // ---
    let app = TestApp::new();
    let cookie = app.signup("Bombur", "pie").await;

    let response = app.get_with_cookie("/index", &cookie).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), TEST_SHELL);
}

#[tokio::test]
async fn expired_session_is_rejected() {
    // ---
    // Zero TTL: sessions expire the moment they are issued.
    let app = TestApp::with_config(common::test_config(
        RunMode::Development,
        PathBuf::from("build"),
        Duration::ZERO,
    ));
    let cookie = app.signup("Gloin", "beard").await;

    let response = app.get_with_cookie("/index", &cookie).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
