// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the idea storage layer

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use ideaflow_ideas::{IdeaStorage, StorageError, StorageResult};

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub idea_storage: Arc<IdeaStorage>,
}

impl DbState {
    /// Wrap an existing pool and make sure the ideas table exists
    pub async fn new(pool: SqlitePool) -> StorageResult<Self> {
        let idea_storage = Arc::new(IdeaStorage::new(pool));
        idea_storage.initialize().await?;

        Ok(Self { idea_storage })
    }

    /// Open (creating if needed) the database file at `database_path`
    pub async fn init_with_path(database_path: PathBuf) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await?;

        info!("Connected to the SQLite database at {}", database_path.display());

        Self::new(pool).await
    }

    /// Single-connection in-memory database, used by tests
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Self::new(pool).await
    }
}
