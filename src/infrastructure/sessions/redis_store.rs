//! Redis-backed session storage.
//!
//! Each session is a JSON value under `session:{token}` written with `SET EX`,
//! so Redis expires it without any sweeping on our side.

use anyhow::{Context, Result};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{SessionRecord, SessionStore, SessionStorePtr};

/// Creates a session store talking to the Redis server at `url`.
///
/// Connections are opened per call, so this only validates the URL.
pub fn create_redis_session_store(url: &str) -> Result<SessionStorePtr> {
    // ---
    let client = Client::open(url).context("Invalid Redis connection URL")?;

    Ok(Arc::new(RedisSessionStore { client }))
}

pub struct RedisSessionStore {
    // ---
    client: Client,
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

impl RedisSessionStore {
    // ---
    async fn get_conn(&self) -> Result<MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    // ---
    async fn put(&self, token: &str, record: &SessionRecord, ttl: Duration) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        let session_json = serde_json::to_string(record)?;

        conn.set_ex::<_, _, ()>(session_key(token), session_json, ttl.as_secs().max(1))
            .await?;

        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<SessionRecord>> {
        // ---
        let mut conn = self.get_conn().await?;

        let raw: Option<String> = conn.get(session_key(token)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(())
    }
}
