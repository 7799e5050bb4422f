//! # Quill Store
//!
//! SQLite persistence for users, posts, likes and comments.
//!
//! Every query function takes an explicit `&mut SqliteConnection`; callers
//! acquire one pooled connection per request and hand it down. The connection
//! goes back to the pool when the caller drops it.
//!
//! ## Invariants
//! - Foreign keys are enforced on every connection
//! - Every foreign key cascades on delete
//! - A user likes a post at most once (`UNIQUE(post_id, user_id)`)

pub mod comments;
pub mod errors;
pub mod likes;
pub mod posts;
pub mod schema;
pub mod users;

use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

use crate::config::DatabaseConfig;

pub use errors::{StoreError, StoreResult};

/// Handle to the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database described by `config`, creating the file if needed
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(url = %config.url, max_connections = config.max_connections, "database connected");
        Ok(Self { pool })
    }

    /// Private in-memory database.
    ///
    /// Each SQLite memory connection is its own database, so the pool holds
    /// exactly one connection and never recycles it.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create all tables and indexes that do not exist yet
    pub async fn create_schema(&self) -> StoreResult<()> {
        let mut conn = self.acquire().await?;
        schema::create_all(&mut conn).await
    }

    /// Take one connection out of the pool for the duration of a request
    pub async fn acquire(&self) -> StoreResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        db.create_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("quill.db").display()),
            max_connections: 2,
        };

        let db = Database::connect(&config).await.unwrap();
        db.create_schema().await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        let user = users::insert(&mut conn, "alice", "hash").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let result = posts::insert(&mut conn, 42, "title", "content").await;
        assert!(matches!(result, Err(StoreError::MissingReference)));
    }
}
