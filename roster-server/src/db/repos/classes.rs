//! Class repository
//!
//! Plain CRUD over the `classes` table:
//! - create: INSERT ... RETURNING (generated id in the same statement)
//! - update/delete: NotFound when no row matched

use sqlx::FromRow;

use crate::db::Database;
use crate::models::NewClass;
use super::DbError;

/// Class record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Class {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: String,
    pub max_students: i64,
}

/// Class repository
pub struct ClassRepo<'a> {
    db: &'a Database,
}

impl<'a> ClassRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all classes in storage order.
    pub async fn list(&self) -> Result<Vec<Class>, DbError> {
        let mut conn = self.db.connect().await?;
        let classes = sqlx::query_as::<_, Class>(
            r#"
            SELECT id, code, title, description, max_students
            FROM classes
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(classes)
    }

    /// Get a single class by id.
    pub async fn get(&self, id: i64) -> Result<Option<Class>, DbError> {
        let mut conn = self.db.connect().await?;
        let class = sqlx::query_as::<_, Class>(
            r#"
            SELECT id, code, title, description, max_students
            FROM classes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;

        Ok(class)
    }

    /// Insert a class and return it with its generated id.
    ///
    /// A duplicate `code` is rejected by the unique constraint.
    pub async fn create(&self, new: NewClass) -> Result<Class, DbError> {
        let mut conn = self.db.connect().await?;
        let class = sqlx::query_as::<_, Class>(
            r#"
            INSERT INTO classes (code, title, description, max_students)
            VALUES (?, ?, ?, ?)
            RETURNING id, code, title, description, max_students
            "#,
        )
        .bind(&new.code)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.max_students)
        .fetch_one(&mut conn)
        .await?;

        tracing::info!(id = class.id, code = %class.code, "class created");
        Ok(class)
    }

    /// Replace every field of an existing class.
    pub async fn update(&self, id: i64, changes: NewClass) -> Result<Class, DbError> {
        let mut conn = self.db.connect().await?;
        let class = sqlx::query_as::<_, Class>(
            r#"
            UPDATE classes
            SET code = ?, title = ?, description = ?, max_students = ?
            WHERE id = ?
            RETURNING id, code, title, description, max_students
            "#,
        )
        .bind(&changes.code)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.max_students)
        .bind(id)
        .fetch_optional(&mut conn)
        .await?
        .ok_or_else(|| DbError::not_found("class", id))?;

        tracing::info!(id, "class updated");
        Ok(class)
    }

    /// Delete a class.
    ///
    /// Fails with a foreign key violation while students are registered.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut conn = self.db.connect().await?;
        let result = sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("class", id));
        }

        tracing::info!(id, "class deleted");
        Ok(())
    }
}
