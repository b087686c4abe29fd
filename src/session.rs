//! Session management for authenticated users.
//!
//! A session is an opaque UUID token handed to the browser in the `ssid`
//! cookie and mapped server-side to a [`SessionRecord`] with a fixed TTL.
//! Sessions are not renewed, rotated, or revoked before they expire.

use anyhow::Context;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::time::Duration;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::{SessionRecord, SessionStorePtr, User};
use crate::error::ApiError;

// ---

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "ssid";

/// Message returned by the session gate.
pub const NOT_LOGGED_IN: &str = "Not logged in";

// ---

/// The authenticated caller, as resolved from a live session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    //
    pub user_id: String,
    pub username: String,
}

// ---

/// Creates a new session token for `user` and stores it with the given TTL.
///
/// # Returns
/// Session token (UUID) on success.
pub async fn create_session(
    store: &SessionStorePtr,
    user: &User,
    ttl: Duration,
) -> Result<String, ApiError> {
    //
    let token = Uuid::new_v4().to_string();
    let expires_at = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| chrono::Utc::now().timestamp().checked_add(secs))
        .with_context(|| format!("session TTL of {}s is out of range", ttl.as_secs()))?;

    let record = SessionRecord {
        //
        user_id: user.id.clone(),
        username: user.username.clone(),
        expires_at,
    };

    store.put(&token, &record, ttl).await?;

    tracing::info!("Created session for user: {}", user.username);

    Ok(token)
}

/// Resolves a session token to the session's owner.
///
/// Returns `Ok(None)` for unknown or expired tokens; errors only when the
/// session store itself fails.
pub async fn validate_session(
    store: &SessionStorePtr,
    token: &str,
) -> Result<Option<SessionInfo>, ApiError> {
    //
    if Uuid::parse_str(token).is_err() {
        return Ok(None);
    }

    let Some(record) = store.get(token).await? else {
        return Ok(None);
    };

    if record.expires_at <= chrono::Utc::now().timestamp() {
        tracing::debug!("Rejecting expired session for user: {}", record.username);
        return Ok(None);
    }

    Ok(Some(SessionInfo {
        user_id: record.user_id,
        username: record.username,
    }))
}

/// Resolves the session named by the request's `ssid` cookie, if any.
pub async fn session_from_jar(
    store: &SessionStorePtr,
    jar: &CookieJar,
) -> Result<Option<SessionInfo>, ApiError> {
    //
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => validate_session(store, cookie.value()).await,
        None => Ok(None),
    }
}

/// Builds the `ssid` cookie for a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    //
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Session gate for protected routes.
///
/// Short-circuits with `401` unless the `ssid` cookie names a live session.
/// On success the [`SessionInfo`] is placed in the request extensions for
/// the downstream handler.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    //
    let session = session_from_jar(state.sessions(), &jar)
        .await?
        .ok_or_else(|| ApiError::unauthorized(NOT_LOGGED_IN))?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
