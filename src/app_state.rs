//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. It is built once by the entry
//! point and is cheap to clone (everything heavy sits behind an `Arc`).

use crate::domain::{MetricsPtr, RepositoryPtr, SessionStorePtr};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state passed to all Axum handlers.
///
/// This struct is the dependency injection container for the service.
/// Handlers depend on the `Repository`/`SessionStore` abstractions, never on
/// the MongoDB or Redis clients directly.
///
/// # Fields
///
/// - `repository`: document store holding `users` and `parking`
/// - `sessions`: session token storage (Redis or in-memory)
/// - `metrics`: metrics implementation (Prometheus or no-op)
/// - `session_ttl`: lifetime of newly issued sessions
/// - `client_shell`: HTML of the single-page client, loaded at startup
#[derive(Clone)]
pub struct AppState {
    repository: RepositoryPtr,
    sessions: SessionStorePtr,
    metrics: MetricsPtr,
    session_ttl: Duration,
    client_shell: Arc<str>,
}

impl AppState {
    // ---

    pub fn new(
        repository: RepositoryPtr,
        sessions: SessionStorePtr,
        metrics: MetricsPtr,
        session_ttl: Duration,
        client_shell: impl Into<Arc<str>>,
    ) -> Self {
        // ---
        AppState {
            repository,
            sessions,
            metrics,
            session_ttl,
            client_shell: client_shell.into(),
        }
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        &self.repository
    }

    /// Get a reference to the session store.
    pub(crate) fn sessions(&self) -> &SessionStorePtr {
        &self.sessions
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        &self.metrics
    }

    /// Lifetime given to sessions issued from now on.
    pub(crate) fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// The client application's HTML shell.
    pub(crate) fn client_shell(&self) -> &str {
        &self.client_shell
    }
}
