use axum::{extract::{Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use crate::app_state::AppState;

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default (no query parameters), performs a light check to confirm the web server
///   is running.
///
/// - If `mode=full` is passed as a query parameter, also pings the document store and
///   the session store.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` if server (and backends, in full mode) are healthy.
/// - `500 INTERNAL SERVER ERROR` with `{ "status": "error" }` if a backend ping fails in full mode.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    match params.mode.as_deref() {
        Some("full") => {
            // Full health check: ping both backends
            if let Err(err) = state.repository().ping().await {
                tracing::error!("Document store health check failed: {:#}", err);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(HealthResponse { status: "error" }),
                );
            }

            if let Err(err) = state.sessions().ping().await {
                tracing::error!("Session store health check failed: {:#}", err);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(HealthResponse { status: "error" }),
                );
            }

            (StatusCode::OK, Json(HealthResponse { status: "ok" }))
        }
        _ => {
            // Light health check
            (StatusCode::OK, Json(HealthResponse { status: "ok" }))
        }
    }
}
