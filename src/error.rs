//! Unified API error handling.
//!
//! Every handler returns [`ApiError`] on failure. It is mapped to an HTTP
//! response in exactly one place, its `IntoResponse` impl, which renders
//! `{ "err": <message> }` with the variant's status code. Internal failures
//! are logged with their full detail and answered with a sanitized message.
//!
//! Failures that never became an `ApiError` (a panicking handler) are
//! answered by [`uncaught_error_response`] with the default status, 400.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message returned to clients for any failure whose detail stays server-side.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error kinds surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tagged error result propagated from route handlers to the response boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    /// The wrapped error is logged, never sent to the client.
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    // ---
    pub err: String,
}

impl ApiError {
    // ---
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        // ---
        match self {
            ApiError::BadRequest(_) => ErrorKind::BadRequest,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        // ---
        match self {
            ApiError::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();

        match &self {
            ApiError::Internal(err) => tracing::error!("Request failed: {err:#}"),
            other => tracing::debug!(status = status.as_u16(), "Request rejected: {other}"),
        }

        let body = ErrorResponse {
            err: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Response for an error that escaped every handler.
pub fn uncaught_error_response(detail: &str) -> Response {
    // ---
    tracing::error!("Uncaught handler error: {detail}");

    let body = ErrorResponse {
        err: GENERIC_ERROR_MESSAGE.to_string(),
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<crate::domain::CoordinateError> for ApiError {
    fn from(err: crate::domain::CoordinateError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
