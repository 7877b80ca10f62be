//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One connection per call, dropped on every exit path
//! - Generated ids come back from `INSERT ... RETURNING`
//! - Zero rows affected on update/delete is `DbError::NotFound`
//! - Check-then-insert sequences run inside one transaction

pub mod classes;
pub mod students;
pub mod registrations;

pub use classes::{Class, ClassRepo};
pub use students::{Student, StudentRepo};
pub use registrations::{RegisteredStudent, RegistrationRepo};

use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteConnection;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// True when the statement was rejected by a table constraint
    /// (unique, foreign key, not-null or check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => matches!(
                e.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}

pub(crate) async fn student_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, DbError> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}

pub(crate) async fn class_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, DbError> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM classes WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}
