// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use repark::domain::{MetricsPtr, SessionStorePtr};
use repark::{
    build_router, create_memory_repository, create_memory_session_store, create_noop_metrics,
    AppConfig, AppState, ClientConfig, RunMode, ServerConfig, SessionConfig, StoreBackend,
    StoreConfig,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_SHELL: &str = "<!DOCTYPE html><html><body>rePark test shell</body></html>";

static TRACING_INIT: Once = Once::new();

// ============================================================================
// Test Setup
// ============================================================================

/// Initialize tracing once; set TEST_DEBUG to see handler logs.
pub fn init_tracing() {
    // ---
    TRACING_INIT.call_once(|| {
        if std::env::var("TEST_DEBUG").is_ok() {
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_test_writer()
                .with_env_filter("debug")
                .init();
        }
    });
}

pub fn test_config(mode: RunMode, build_dir: PathBuf, session_ttl: Duration) -> AppConfig {
    // ---
    AppConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            mode,
            metrics_type: "noop".to_string(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        session: SessionConfig {
            redis_url: None,
            ttl: session_ttl,
        },
        client: ClientConfig {
            index_file: PathBuf::from("client/index.html"),
            assets_dir: PathBuf::from("assets"),
            build_dir,
        },
    }
}

/// A router over fresh in-memory backends, driven in-process.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
}

/// Status, headers and raw body of a finished request.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    // ---
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `ssid=<token>` pair from `Set-Cookie`, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        // ---
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("ssid="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    // ---
    pub fn new() -> Self {
        Self::with_config(test_config(
            RunMode::Development,
            PathBuf::from("build"),
            Duration::from_secs(3600),
        ))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_metrics(config, create_noop_metrics().expect("noop metrics"))
    }

    pub fn with_metrics(config: AppConfig, metrics: MetricsPtr) -> Self {
        Self::with_backends(config, metrics, create_memory_session_store())
    }

    /// Default config over the given session store.
    pub fn with_sessions(sessions: SessionStorePtr) -> Self {
        // ---
        let config = test_config(
            RunMode::Development,
            PathBuf::from("build"),
            Duration::from_secs(3600),
        );
        Self::with_backends(config, create_noop_metrics().expect("noop metrics"), sessions)
    }

    fn with_backends(config: AppConfig, metrics: MetricsPtr, sessions: SessionStorePtr) -> Self {
        // ---
        init_tracing();

        let state = AppState::new(
            create_memory_repository(),
            sessions,
            metrics,
            config.session.ttl,
            TEST_SHELL,
        );

        Self {
            router: build_router(state, &config),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        // ---
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should not fail");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, Body::empty())).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(request(Method::GET, uri, Some(cookie), Body::empty()))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        // ---
        let mut req = request(Method::POST, uri, cookie, Body::from(body.to_string()));
        req.headers_mut().insert(
            header::CONTENT_TYPE,
            "application/json".parse().expect("valid header"),
        );
        self.send(req).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        // ---
        let mut req = request(Method::POST, uri, None, Body::from(body.to_string()));
        req.headers_mut().insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded"
                .parse()
                .expect("valid header"),
        );
        self.send(req).await
    }

    /// Sign up a fresh account and return its session cookie.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        // ---
        let response = self
            .post_json(
                "/signup",
                serde_json::json!({ "username": username, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

        response.session_cookie().expect("signup should set ssid")
    }
}

pub fn request(method: Method, uri: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    // ---
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body).expect("valid request")
}
