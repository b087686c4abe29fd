use anyhow::{Context, Result};
use futures::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{bson::doc, Client, Collection, Database, IndexModel};
use std::sync::Arc;

use crate::domain::{ParkingSpot, Repository, RepositoryError, RepositoryPtr, User};

const USERS: &str = "users";
const PARKING: &str = "parking";

/// Server code for a unique index violation (E11000).
const DUPLICATE_KEY: i32 = 11000;

/// Builds a MongoDB-backed repository for the given connection URI.
///
/// Fails only on a malformed URI or an unresolvable SRV record. An
/// unreachable server is logged and the repository is returned anyway; the
/// unique username index is created on the first successful connection here,
/// so a server that was down at startup relies on the signup pre-check alone
/// until the next restart.
pub async fn create_mongo_repository(uri: &str, database: &str) -> Result<RepositoryPtr> {
    // ---
    let client = Client::with_uri_str(uri)
        .await
        .context("Invalid MongoDB connection URI")?;

    let repository = MongoRepository::new(client.database(database));

    match repository.ensure_indexes().await {
        Ok(()) => tracing::info!("Connected to MongoDB database {}", database),
        Err(err) => tracing::error!("MongoDB is unreachable, serving degraded: {:#}", err),
    }

    Ok(Arc::new(repository))
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

pub struct MongoRepository {
    // ---
    db: Database,
}

impl MongoRepository {
    // ---
    pub fn new(db: Database) -> Self {
        // ---
        Self { db }
    }

    /// Unique index on `users.username`; a no-op when it already exists.
    pub async fn ensure_indexes(&self) -> Result<()> {
        // ---
        let unique_username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users()
            .create_index(unique_username)
            .await
            .context("Failed to create unique username index")?;

        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn parking(&self) -> Collection<ParkingSpot> {
        self.db.collection(PARKING)
    }
}

#[async_trait::async_trait]
impl Repository for MongoRepository {
    // ---
    async fn create_user(&self, user: User) -> Result<User, RepositoryError> {
        // ---
        match self.users().insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(err) if is_duplicate_key(&err) => {
                Err(RepositoryError::DuplicateUsername(user.username))
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context("Failed to insert user")
                .into()),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        // ---
        let user = self
            .users()
            .find_one(doc! { "username": username })
            .await?;

        Ok(user)
    }

    async fn create_spot(&self, spot: ParkingSpot) -> Result<ParkingSpot> {
        // ---
        self.parking().insert_one(&spot).await?;

        Ok(spot)
    }

    async fn list_spots(&self) -> Result<Vec<ParkingSpot>> {
        // ---
        let cursor = self.parking().find(doc! {}).await?;
        let spots: Vec<ParkingSpot> = cursor.try_collect().await?;

        Ok(spots)
    }

    async fn ping(&self) -> Result<()> {
        // ---
        self.db.run_command(doc! { "ping": 1 }).await?;

        Ok(())
    }
}
