use super::models::{ParkingSpot, User};
use anyhow::Result;
use std::sync::Arc;

/// Failure to persist a new user.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Another account already holds this username.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Abstraction over the document store holding `users` and `parking`.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Persist a new user record.
    ///
    /// Usernames are unique; a taken one yields
    /// [`RepositoryError::DuplicateUsername`] whichever request wins the race.
    async fn create_user(&self, user: User) -> Result<User, RepositoryError>;

    /// Get user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Persist a new parking-spot posting.
    async fn create_spot(&self, spot: ParkingSpot) -> Result<ParkingSpot>;

    /// Every posting, in whatever order the store returns them.
    async fn list_spots(&self) -> Result<Vec<ParkingSpot>>;

    /// Round-trip to the backing store, used by the full health check.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
