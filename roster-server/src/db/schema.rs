//! Roster schema
//!
//! Idempotent: every statement uses `IF NOT EXISTS`.

use sqlx::sqlite::SqliteConnection;

use super::repos::DbError;

/// Create all roster tables and indexes
pub async fn run(conn: &mut SqliteConnection) -> Result<(), DbError> {
    tracing::debug!("applying roster schema");

    // `code` identifies a class to people, so it has to be unique
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            max_students INTEGER NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    // No ON DELETE action: removing an enrolled student or class is rejected
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS registered_students (
            class_id INTEGER NOT NULL REFERENCES classes(id),
            student_id INTEGER NOT NULL REFERENCES students(id),
            signup_date TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    create_indexes(conn).await?;

    Ok(())
}

async fn create_indexes(conn: &mut SqliteConnection) -> Result<(), DbError> {
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_registered_students_student ON registered_students(student_id)",
    )
    .execute(&mut *conn)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_registered_students_class ON registered_students(class_id)",
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}
