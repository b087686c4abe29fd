use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{ParkingSpot, Repository, RepositoryError, RepositoryPtr, User};

/// Creates a process-local repository.
///
/// Data lives only as long as the process. Used with `REPARK_STORE=memory`
/// and by the test suites.
pub fn create_memory_repository() -> RepositoryPtr {
    // ---
    Arc::new(MemoryRepository::default())
}

#[derive(Default)]
pub struct MemoryRepository {
    // ---
    users: RwLock<Vec<User>>,
    spots: RwLock<Vec<ParkingSpot>>,
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn create_user(&self, user: User) -> Result<User, RepositoryError> {
        // ---
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::DuplicateUsername(user.username));
        }
        users.push(user.clone());

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        // ---
        let users = self.users.read().await;

        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_spot(&self, spot: ParkingSpot) -> Result<ParkingSpot> {
        // ---
        self.spots.write().await.push(spot.clone());

        Ok(spot)
    }

    async fn list_spots(&self) -> Result<Vec<ParkingSpot>> {
        // ---
        Ok(self.spots.read().await.clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
