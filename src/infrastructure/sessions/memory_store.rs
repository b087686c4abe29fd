use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::{SessionRecord, SessionStore, SessionStorePtr};

/// Creates a process-local session store. Sessions do not survive a restart.
pub fn create_memory_session_store() -> SessionStorePtr {
    // ---
    Arc::new(MemorySessionStore::default())
}

#[derive(Default)]
pub struct MemorySessionStore {
    // ---
    sessions: RwLock<HashMap<String, (SessionRecord, Instant)>>,
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    // ---
    async fn put(&self, token: &str, record: &SessionRecord, ttl: Duration) -> Result<()> {
        // ---
        let deadline = Instant::now()
            .checked_add(ttl)
            .context("session TTL out of range")?;
        let mut sessions = self.sessions.write().await;

        // Sweep on write so abandoned sessions don't accumulate.
        let now = Instant::now();
        sessions.retain(|_, (_, expires)| *expires > now);
        sessions.insert(token.to_string(), (record.clone(), deadline));

        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<SessionRecord>> {
        // ---
        let sessions = self.sessions.read().await;

        Ok(sessions
            .get(token)
            .filter(|(_, expires)| *expires > Instant::now())
            .map(|(record, _)| record.clone()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
