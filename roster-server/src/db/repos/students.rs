//! Student repository

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::db::Database;
use crate::models::{NewStudent, StudentChanges};
use super::DbError;

/// Student record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// Student repository
pub struct StudentRepo<'a> {
    db: &'a Database,
}

impl<'a> StudentRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all students in storage order.
    pub async fn list(&self) -> Result<Vec<Student>, DbError> {
        let mut conn = self.db.connect().await?;
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, birth_date
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(students)
    }

    /// Get a single student; `None` when no row matches.
    pub async fn get(&self, id: i64) -> Result<Option<Student>, DbError> {
        let mut conn = self.db.connect().await?;
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, birth_date
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;

        Ok(student)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.db.connect().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&mut conn)
            .await?;
        Ok(count)
    }

    /// Insert a student and return it with its generated id.
    pub async fn create(&self, new: NewStudent) -> Result<Student, DbError> {
        let mut conn = self.db.connect().await?;
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (first_name, last_name, birth_date)
            VALUES (?, ?, ?)
            RETURNING id, first_name, last_name, birth_date
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.birth_date)
        .fetch_one(&mut conn)
        .await?;

        tracing::info!(id = student.id, "student created");
        Ok(student)
    }

    /// Replace every field of an existing student.
    pub async fn update(&self, id: i64, changes: NewStudent) -> Result<Student, DbError> {
        let mut conn = self.db.connect().await?;
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = ?, last_name = ?, birth_date = ?
            WHERE id = ?
            RETURNING id, first_name, last_name, birth_date
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.birth_date)
        .bind(id)
        .fetch_optional(&mut conn)
        .await?
        .ok_or_else(|| DbError::not_found("student", id))?;

        tracing::info!(id, "student updated");
        Ok(student)
    }

    /// Update only the provided fields in a single statement.
    ///
    /// An empty change set writes nothing and returns the stored row.
    pub async fn patch(&self, id: i64, changes: StudentChanges) -> Result<Student, DbError> {
        if changes.is_empty() {
            return self
                .get(id)
                .await?
                .ok_or_else(|| DbError::not_found("student", id));
        }

        let mut conn = self.db.connect().await?;
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                birth_date = COALESCE(?, birth_date)
            WHERE id = ?
            RETURNING id, first_name, last_name, birth_date
            "#,
        )
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.birth_date)
        .bind(id)
        .fetch_optional(&mut conn)
        .await?
        .ok_or_else(|| DbError::not_found("student", id))?;

        tracing::info!(id, "student patched");
        Ok(student)
    }

    /// Delete a student.
    ///
    /// Fails with a foreign key violation while the student is registered
    /// in any class.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut conn = self.db.connect().await?;
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("student", id));
        }

        tracing::info!(id, "student deleted");
        Ok(())
    }
}
