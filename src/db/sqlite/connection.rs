//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use super::document::SqliteDocumentStore;
use crate::db::{Database, StoreError, StoreResult};

/// SQLite database implementation.
///
/// Constructed once at startup and handed to whatever needs the store; the
/// pool inside is cheap to clone.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if missing.
    pub async fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every new in-memory connection would start from an empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                StoreError::Connection {
                    message: e.to_string(),
                }
            })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Documents = SqliteDocumentStore;

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./data/sql/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration {
                message: e.to_string(),
            })
    }

    fn documents(&self) -> Self::Documents {
        SqliteDocumentStore {
            pool: self.pool.clone(),
        }
    }
}
