//! Database layer - connection handling, schema and repositories
//!
//! # Design Principles
//!
//! - A connection per operation, released on drop - no pool, no shared connection
//! - Joins recover the student/class relation - no N+1
//! - Storage-generated ids only, read back with RETURNING
//! - Transactions for check-then-write sequences

pub mod database;
pub mod repos;
pub mod schema;
pub mod seed;

pub use database::Database;
pub use repos::*;
pub use seed::{seed, SeedOutcome};
