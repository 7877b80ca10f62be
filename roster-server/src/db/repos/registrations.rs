//! Registration repository
//!
//! The junction table only stores ids; every read joins back to
//! `students` and `classes` to produce `RegisteredStudent` rows.
//! Add and remove are single statements; existence checks only run
//! afterwards to name the missing parent when nothing matched.

use chrono::Local;
use sqlx::sqlite::SqliteConnection;
use sqlx::FromRow;

use crate::db::Database;
use super::{class_exists, student_exists, DbError};

/// One (student, class) pair from the roster join
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RegisteredStudent {
    pub student_id: i64,
    pub student_full_name: String,
    pub class_code: String,
    pub class_title: String,
}

/// Registration repository
pub struct RegistrationRepo<'a> {
    db: &'a Database,
}

impl<'a> RegistrationRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Full roster, ordered by last name, first name, then class code.
    pub async fn list_all(&self) -> Result<Vec<RegisteredStudent>, DbError> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query_as::<_, RegisteredStudent>(
            r#"
            SELECT s.id AS student_id,
                   s.first_name || ' ' || s.last_name AS student_full_name,
                   c.code AS class_code,
                   c.title AS class_title
            FROM students s
            INNER JOIN registered_students r ON s.id = r.student_id
            INNER JOIN classes c ON c.id = r.class_id
            ORDER BY s.last_name, s.first_name, c.code
            "#,
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(rows)
    }

    /// Students registered in the class with `class_code`.
    ///
    /// An unknown code simply yields no rows.
    pub async fn students_in_class(&self, class_code: &str) -> Result<Vec<RegisteredStudent>, DbError> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query_as::<_, RegisteredStudent>(
            r#"
            SELECT s.id AS student_id,
                   s.first_name || ' ' || s.last_name AS student_full_name,
                   c.code AS class_code,
                   c.title AS class_title
            FROM students s
            INNER JOIN registered_students r ON s.id = r.student_id
            INNER JOIN classes c ON c.id = r.class_id
            WHERE c.code = ?
            ORDER BY s.last_name, s.first_name, s.id
            "#,
        )
        .bind(class_code)
        .fetch_all(&mut conn)
        .await?;

        Ok(rows)
    }

    /// Classes the student is registered in, ordered by class code.
    ///
    /// NotFound if the student does not exist; empty if they exist but
    /// are not registered anywhere.
    pub async fn classes_for_student(&self, student_id: i64) -> Result<Vec<RegisteredStudent>, DbError> {
        let mut conn = self.db.connect().await?;

        if !student_exists(&mut conn, student_id).await? {
            return Err(DbError::not_found("student", student_id));
        }

        let rows = sqlx::query_as::<_, RegisteredStudent>(
            r#"
            SELECT s.id AS student_id,
                   s.first_name || ' ' || s.last_name AS student_full_name,
                   c.code AS class_code,
                   c.title AS class_title
            FROM students s
            INNER JOIN registered_students r ON s.id = r.student_id
            INNER JOIN classes c ON c.id = r.class_id
            WHERE s.id = ?
            ORDER BY c.code
            "#,
        )
        .bind(student_id)
        .fetch_all(&mut conn)
        .await?;

        Ok(rows)
    }

    /// Register a student in a class, signed up today.
    ///
    /// The insert is a single statement guarded by both existence checks,
    /// so nothing is inserted unless the student and the class exist.
    pub async fn add(&self, student_id: i64, class_id: i64) -> Result<(), DbError> {
        let mut conn = self.db.connect().await?;

        let signup_date = Local::now().date_naive();
        let result = sqlx::query(
            r#"
            INSERT INTO registered_students (class_id, student_id, signup_date)
            SELECT ?, ?, ?
            WHERE EXISTS(SELECT 1 FROM students WHERE id = ?)
              AND EXISTS(SELECT 1 FROM classes WHERE id = ?)
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .bind(signup_date)
        .bind(student_id)
        .bind(class_id)
        .execute(&mut conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(missing_parent(&mut conn, student_id, class_id)
                .await?
                .unwrap_or_else(|| DbError::not_found("student", student_id)));
        }

        tracing::info!(student_id, class_id, %signup_date, "student registered");
        Ok(())
    }

    /// Drop a student from a class.
    ///
    /// Removes every registration row for the pair. NotFound when the
    /// student, the class, or the registration itself is missing.
    pub async fn remove(&self, student_id: i64, class_id: i64) -> Result<(), DbError> {
        let mut conn = self.db.connect().await?;

        let result = sqlx::query(
            "DELETE FROM registered_students WHERE class_id = ? AND student_id = ?",
        )
        .bind(class_id)
        .bind(student_id)
        .execute(&mut conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(missing_parent(&mut conn, student_id, class_id)
                .await?
                .unwrap_or_else(|| {
                    DbError::not_found(
                        "registration",
                        format!("student {} in class {}", student_id, class_id),
                    )
                }));
        }

        tracing::info!(
            student_id,
            class_id,
            removed = result.rows_affected(),
            "student dropped from class"
        );
        Ok(())
    }

    /// Number of junction rows, duplicates included.
    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.db.connect().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registered_students")
            .fetch_one(&mut conn)
            .await?;
        Ok(count)
    }
}

/// NotFound for whichever of the pair is missing, student first.
async fn missing_parent(
    conn: &mut SqliteConnection,
    student_id: i64,
    class_id: i64,
) -> Result<Option<DbError>, DbError> {
    if !student_exists(conn, student_id).await? {
        return Ok(Some(DbError::not_found("student", student_id)));
    }
    if !class_exists(conn, class_id).await? {
        return Ok(Some(DbError::not_found("class", class_id)));
    }
    Ok(None)
}
