//! Database handle and connection management
//!
//! `Database` holds connection options only. Every repository call opens its
//! own connection and drops it before returning; nothing is pooled or cached
//! between calls.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

use super::repos::DbError;
use super::schema;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite database file handle
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Describe the database at `path` without touching the file.
    ///
    /// The file is created on first connect if it does not exist.
    /// Foreign key enforcement is switched on for every connection, and
    /// writers wait up to `BUSY_TIMEOUT` for the file lock.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        Self { path, options }
    }

    /// Open the database at `path` and make sure the schema exists.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::open("roster.db").await?;
    /// let students = StudentRepo::new(&db).list().await?;
    /// ```
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let db = Self::new(path);
        db.migrate().await?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection.
    ///
    /// The connection is closed when the returned value is dropped.
    pub async fn connect(&self) -> Result<SqliteConnection, DbError> {
        tracing::debug!(path = %self.path.display(), "opening database connection");
        let conn = self.options.connect().await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to connect");
            e
        })?;
        Ok(conn)
    }

    /// Create tables and indexes if they are missing.
    pub async fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connect().await?;
        schema::run(&mut conn).await
    }

    /// SQLite library version, used as a connectivity check.
    pub async fn sqlite_version(&self) -> Result<String, DbError> {
        let mut conn = self.connect().await?;
        let (version,): (String,) = sqlx::query_as("SELECT sqlite_version()")
            .fetch_one(&mut conn)
            .await?;
        Ok(version)
    }
}
