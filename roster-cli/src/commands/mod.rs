//! Command implementations for the roster CLI

pub mod db;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use db::{run_init, run_seed};
pub use serve::run_serve;
