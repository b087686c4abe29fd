use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::app_state::AppState;
use crate::session::SessionInfo;

/// Path prefixes that never fall back to the client shell.
const RESERVED_PREFIXES: &[&str] = &["/api", "/assets", "/build"];

/// Serves the single-page client (GET /).
pub async fn client_shell(State(state): State<AppState>) -> Html<String> {
    Html(state.client_shell().to_owned())
}

/// Serves the client to a logged-in user (GET /index).
///
/// Mounted behind the session gate, which supplies the [`SessionInfo`].
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionInfo>,
) -> Html<String> {
    // ---
    tracing::debug!("Serving client to user: {}", session.username);

    Html(state.client_shell().to_owned())
}

/// Catch-all for requests no route claimed.
///
/// GETs for client-side routes get the shell so the browser router can take
/// over. Everything else, including unknown API and static paths, is a
/// bare `404`.
pub async fn fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    // ---
    if method == Method::GET && !is_reserved(uri.path()) {
        return Html(state.client_shell().to_owned()).into_response();
    }

    tracing::debug!("No route for {} {}", method, uri.path());
    StatusCode::NOT_FOUND.into_response()
}

fn is_reserved(path: &str) -> bool {
    // ---
    RESERVED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
