use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Session data stored under an opaque token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    //
    pub user_id: String,
    pub username: String,

    /// Unix timestamp (seconds) after which the session is no longer honored.
    pub expires_at: i64,
}

/// Abstraction over where session records live.
///
/// Backends must drop records once `ttl` elapses; callers still check
/// `expires_at` so a lagging backend cannot extend a session.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // ---
    /// Store `record` under `token` for at most `ttl`.
    async fn put(&self, token: &str, record: &SessionRecord, ttl: Duration) -> Result<()>;

    /// Look up the record for `token`, if any.
    async fn get(&self, token: &str) -> Result<Option<SessionRecord>>;

    /// Round-trip to the backing store, used by the full health check.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements SessionStore.
pub type SessionStorePtr = Arc<dyn SessionStore>;
