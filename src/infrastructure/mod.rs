mod database;
pub mod metrics;
mod sessions;

// Re-export the factory functions for easy access
pub use database::{create_memory_repository, create_mongo_repository};
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use sessions::{create_memory_session_store, create_redis_session_store};
