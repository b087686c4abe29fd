// src/lib.rs
use anyhow::Result;
use axum::{
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::path::Path;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use handlers::{
    client_shell, create_spot, fallback, health_check, index, list_spots, login, metrics_handler,
    signup, track_http_metrics,
};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod error;
mod handlers;
mod infrastructure;
mod password;
mod session;

// Hoist up only the public symbol(s)
pub use app_state::AppState;
pub use config::*;
pub use error::{ApiError, ErrorKind, ErrorResponse, GENERIC_ERROR_MESSAGE};
pub use session::{create_session, validate_session, SessionInfo, NOT_LOGGED_IN, SESSION_COOKIE};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_memory_repository, // ---
    create_memory_session_store,
    create_mongo_repository,
    create_noop_metrics,
    create_prom_metrics,
    create_redis_session_store,
};

/// Shell served when the client build is missing, so the API stays usable.
const FALLBACK_CLIENT_SHELL: &str = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>rePark</title></head>
  <body><div id="root"></div></body>
</html>
"#;

/// Build the application from configuration: backends, state and router.
///
/// A document store that cannot be reached is logged and left in place; the
/// process keeps serving and store-backed requests fail until it recovers.
pub async fn create_app(config: &AppConfig) -> Result<Router> {
    // ---
    let state = build_state(config).await?;

    Ok(build_router(state, config))
}

/// Construct the shared state described by `config`.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    // ---
    let metrics = if config.server.metrics_type == "prom" {
        create_prom_metrics()?
    } else {
        create_noop_metrics()?
    };

    let repository = match &config.store.backend {
        StoreBackend::Mongo { uri, database } => create_mongo_repository(uri, database).await?,
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            create_memory_repository()
        }
    };

    let sessions = match &config.session.redis_url {
        Some(url) => create_redis_session_store(url)?,
        None => {
            tracing::warn!("REPARK_REDIS_URL not set; sessions are kept in memory");
            create_memory_session_store()
        }
    };

    let shell = load_client_shell(&config.client.index_file).await;

    Ok(AppState::new(
        repository,
        sessions,
        metrics,
        config.session.ttl,
        shell,
    ))
}

/// Build the HTTP router around an already constructed state.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    // ---
    let gate = middleware::from_fn_with_state(state.clone(), session::require_session);

    let mut router = Router::new()
        .route("/", get(client_shell))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/index", get(index).route_layer(gate))
        .route("/api/parking", get(list_spots).post(create_spot))
        .nest_service("/assets", ServeDir::new(&config.client.assets_dir));

    if config.server.is_production() {
        tracing::info!("Production mode: serving {}", config.client.build_dir.display());
        router = router.nest_service("/build", ServeDir::new(&config.client.build_dir));
    }

    let router = router.fallback(fallback);

    with_boundary_layers(router, state)
}

/// Wrap a router with the layers every request passes through.
///
/// Outermost first: tracing, panic recovery, request metrics.
fn with_boundary_layers(router: Router<AppState>, state: AppState) -> Router {
    // ---
    router
        .layer(middleware::from_fn_with_state(state.clone(), track_http_metrics))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    // ---
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error::uncaught_error_response(&detail)
}

/// Read the client HTML shell, falling back to a bare page if it is missing.
async fn load_client_shell(path: &Path) -> String {
    // ---
    match tokio::fs::read_to_string(path).await {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!(
                "Client shell {} unavailable ({}); serving placeholder",
                path.display(),
                err
            );
            FALLBACK_CLIENT_SHELL.to_string()
        }
    }
}
