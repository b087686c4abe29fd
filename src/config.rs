// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
///
/// Missing configuration is treated as a deployment error,
/// not a recoverable runtime condition.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional string environment variable, falling back to a default.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub store: store::StoreConfig,
    pub session: session::SessionConfig,
    pub client: client::ClientConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            store: store::StoreConfig::from_env()?,
            session: session::SessionConfig::from_env()?,
            client: client::ClientConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Deployment mode. Production additionally serves the compiled client bundle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RunMode {
        Development,
        Production,
    }

    impl RunMode {
        fn parse(value: &str) -> Self {
            // ---
            if value.eq_ignore_ascii_case("production") {
                RunMode::Production
            } else {
                RunMode::Development
            }
        }
    }

    /// Listener and mode settings.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address to bind. Defaults to `0.0.0.0:3000`.
        pub bind_addr: String,

        /// Read from `REPARK_ENV`, falling back to `NODE_ENV`.
        pub mode: RunMode,

        /// `prom` or `noop`. Defaults to `noop`.
        pub metrics_type: String,
    }

    impl ServerConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            let bind_addr = optional_env!("REPARK_BIND_ADDR", "0.0.0.0:3000");
            let mode = std::env::var("REPARK_ENV")
                .or_else(|_| std::env::var("NODE_ENV"))
                .map(|v| RunMode::parse(&v))
                .unwrap_or(RunMode::Development);
            let metrics_type = optional_env!("REPARK_METRICS_TYPE", "noop");

            Ok(Self {
                bind_addr,
                mode,
                metrics_type,
            })
        }

        pub fn is_production(&self) -> bool {
            // ---
            self.mode == RunMode::Production
        }
    }
}
pub use server::{RunMode, ServerConfig};

// ============================================================
// Document store configuration
// ============================================================

mod store {
    // ---
    use super::*;

    /// Which persistence backend backs the `users` and `parking` collections.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreBackend {
        /// MongoDB, reached through the given connection URI.
        Mongo { uri: String, database: String },
        /// Process-local storage, lost on restart.
        Memory,
    }

    #[derive(Debug, Clone)]
    pub struct StoreConfig {
        pub backend: StoreBackend,
    }

    impl StoreConfig {
        /// Builds a [`StoreConfig`] from environment variables.
        ///
        /// # Errors
        /// `MONGO_URI` is required unless `REPARK_STORE=memory`.
        pub fn from_env() -> Result<Self> {
            // ---
            let kind = optional_env!("REPARK_STORE", "mongo");

            let backend = match kind.as_str() {
                "memory" => StoreBackend::Memory,
                "mongo" => {
                    let uri = required_env!("MONGO_URI");
                    let database = optional_env!("REPARK_MONGO_DB", "rePark");
                    StoreBackend::Mongo { uri, database }
                }
                other => anyhow::bail!("Unsupported REPARK_STORE value: {other}"),
            };

            Ok(Self { backend })
        }
    }
}
pub use store::{StoreBackend, StoreConfig};

// ============================================================
// Session configuration
// ============================================================

mod session {
    // ---
    use super::*;

    /// Longest accepted session lifetime: one year.
    pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

    /// Session storage and expiry policy.
    #[derive(Debug, Clone)]
    pub struct SessionConfig {
        /// Redis connection string. Sessions are kept in memory when unset.
        pub redis_url: Option<String>,

        /// Lifetime of a session from the moment it is issued. Defaults to 7 days.
        pub ttl: Duration,
    }

    impl SessionConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            let redis_url = std::env::var("REPARK_REDIS_URL").ok().filter(|v| !v.is_empty());
            let ttl_secs = optional_env_parse!("REPARK_SESSION_TTL_SEC", u64, 604_800);

            if ttl_secs == 0 || ttl_secs > MAX_SESSION_TTL_SECS {
                anyhow::bail!(
                    "REPARK_SESSION_TTL_SEC must be between 1 and {} seconds",
                    MAX_SESSION_TTL_SECS
                );
            }

            Ok(Self {
                redis_url,
                ttl: Duration::from_secs(ttl_secs),
            })
        }
    }
}
pub use session::{SessionConfig, MAX_SESSION_TTL_SECS};

// ============================================================
// Client (static files) configuration
// ============================================================

mod client {
    // ---
    use super::*;

    /// Locations of the single-page client and its static files.
    #[derive(Debug, Clone)]
    pub struct ClientConfig {
        /// HTML shell returned for `/`, `/index` and unclaimed GET routes.
        pub index_file: PathBuf,

        /// Directory served under `/assets`.
        pub assets_dir: PathBuf,

        /// Directory served under `/build` in production mode.
        pub build_dir: PathBuf,
    }

    impl ClientConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                index_file: optional_env!("REPARK_CLIENT_INDEX", "client/index.html").into(),
                assets_dir: optional_env!("REPARK_ASSETS_DIR", "assets").into(),
                build_dir: optional_env!("REPARK_BUILD_DIR", "build").into(),
            })
        }
    }
}
pub use client::ClientConfig;

// ============================================================
// Tests
// ============================================================
