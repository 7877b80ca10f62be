//! roster-server: class roster HTTP API over SQLite
//!
//! Students, classes and the registrations between them, stored in a
//! single SQLite file and served as JSON.

pub mod db;
pub mod http;
pub mod models;

pub use db::{Database, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
