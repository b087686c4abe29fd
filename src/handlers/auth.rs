//! Account handlers.
//!
//! Implements the two public account operations:
//! 1. `signup` - Create a user and start a session
//! 2. `login` - Verify credentials and start a session
//!
//! Both respond with the account summary and set the `ssid` cookie.

use anyhow::Context;
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::extract::FormOrJson;
use crate::app_state::AppState;
use crate::domain::{RepositoryError, User};
use crate::error::ApiError;
use crate::password::{hash_password, verify_password};
use crate::session::{create_session, session_cookie};

/// Message for any failed login, whether the user exists or not.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

const USERNAME_TAKEN: &str = "Username already taken";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Username and password, posted as JSON or as a form.
#[derive(Deserialize)]
pub struct Credentials {
    //
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// Trimmed username and raw password, both required.
    fn validated(self) -> Result<(String, String), ApiError> {
        // ---
        let username = self.username.trim().to_string();

        if username.is_empty() || self.password.is_empty() {
            return Err(ApiError::bad_request("username and password are required"));
        }

        Ok((username, self.password))
    }
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    //
    pub id: String,
    pub username: String,
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

// ============================================================================
// Signup Handler
// ============================================================================

/// POST /signup
///
/// Creates an account and logs the new user in.
///
/// # Responses
/// - `201 Created` with `{ id, username }` and the `ssid` cookie
/// - `400 Bad Request` if username or password is missing
/// - `409 Conflict` if the username is taken
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    FormOrJson(credentials): FormOrJson<Credentials>,
) -> Result<(StatusCode, CookieJar, Json<AccountResponse>), ApiError> {
    // ---
    let (username, password) = credentials.validated()?;

    // Cheap early exit; the store's uniqueness check below is authoritative.
    if state
        .repository()
        .get_user_by_username(&username)
        .await?
        .is_some()
    {
        tracing::info!("Signup rejected, username taken: {}", username);
        return Err(ApiError::conflict(USERNAME_TAKEN));
    }

    // Argon2 is CPU-bound; run it off the async workers.
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task failed")??;

    let user = match state
        .repository()
        .create_user(User::new(username, password_hash))
        .await
    {
        Ok(user) => user,
        Err(RepositoryError::DuplicateUsername(username)) => {
            tracing::info!("Signup lost race for username: {}", username);
            return Err(ApiError::conflict(USERNAME_TAKEN));
        }
        Err(RepositoryError::Store(err)) => return Err(err.into()),
    };

    state.metrics().record_user_created();
    tracing::info!("Created user: {} ({})", user.username, user.id);

    let token = create_session(state.sessions(), &user, state.session_ttl()).await?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(AccountResponse::from(&user)),
    ))
}

// ============================================================================
// Login Handler
// ============================================================================

/// POST /login
///
/// # Responses
/// - `200 OK` with `{ id, username }` and the `ssid` cookie
/// - `400 Bad Request` if username or password is missing
/// - `401 Unauthorized` if the user is unknown or the password is wrong
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    FormOrJson(credentials): FormOrJson<Credentials>,
) -> Result<(CookieJar, Json<AccountResponse>), ApiError> {
    // ---
    let (username, password) = credentials.validated()?;

    let Some(user) = state.repository().get_user_by_username(&username).await? else {
        tracing::info!("Login failed, unknown user: {}", username);
        state.metrics().record_login(false);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let stored_hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .context("password verification task failed")?;

    state.metrics().record_login(verified);

    if !verified {
        tracing::info!("Login failed, wrong password for user: {}", username);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_session(state.sessions(), &user, state.session_ttl()).await?;

    Ok((jar.add(session_cookie(token)), Json(AccountResponse::from(&user))))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn username_is_trimmed() {
        let (username, password) = creds("  Gloin ", "pw").validated().unwrap();
        assert_eq!(username, "Gloin");
        assert_eq!(password, "pw");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(creds("   ", "pw").validated().is_err());
        assert!(creds("Oin", "").validated().is_err());
    }
}
