//! Demo dataset for a fresh database

use crate::models::{NewClass, NewStudent};
use super::repos::{ClassRepo, DbError, RegistrationRepo, StudentRepo};
use super::Database;

const CLASSES: &[(&str, &str, &str, i64)] = &[
    ("CS208", "Intro to Databases", "Relational modeling, SQL and database-backed APIs", 30),
    ("CS310", "Data Structures", "Lists, trees, hash tables and graphs", 35),
    ("CS321", "Software Engineering", "Team projects, testing and design", 25),
];

const STUDENTS: &[(&str, &str, &str)] = &[
    ("Ada", "Lovelace", "2001-05-14"),
    ("Alan", "Turing", "2000-06-23"),
    ("Grace", "Hopper", "1999-12-09"),
    ("Edsger", "Dijkstra", "2002-05-11"),
];

/// (student index, class index) into the tables above
const REGISTRATIONS: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (2, 2), (3, 1)];

/// What a seed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        classes: usize,
        students: usize,
        registrations: usize,
    },
    /// The database already had classes or students
    Skipped,
}

/// Load the demo dataset when both parent tables are empty.
pub async fn seed(db: &Database) -> Result<SeedOutcome, DbError> {
    let classes = ClassRepo::new(db);
    let students = StudentRepo::new(db);
    let registrations = RegistrationRepo::new(db);

    if !classes.list().await?.is_empty() || students.count().await? > 0 {
        tracing::info!("database already has data, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let mut class_ids = Vec::with_capacity(CLASSES.len());
    for &(code, title, description, max_students) in CLASSES {
        let class = classes
            .create(NewClass::new(code, title, description, max_students))
            .await?;
        class_ids.push(class.id);
    }

    let mut student_ids = Vec::with_capacity(STUDENTS.len());
    for &(first, last, birth_date) in STUDENTS {
        let new = NewStudent::parse(first, last, birth_date).expect("invalid seed birth date");
        student_ids.push(students.create(new).await?.id);
    }

    for &(s, c) in REGISTRATIONS {
        registrations.add(student_ids[s], class_ids[c]).await?;
    }

    let outcome = SeedOutcome::Seeded {
        classes: class_ids.len(),
        students: student_ids.len(),
        registrations: REGISTRATIONS.len(),
    };
    tracing::info!(?outcome, "seed complete");
    Ok(outcome)
}
