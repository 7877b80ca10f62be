//! Route handlers organized by resource

pub mod health;
pub mod students;
pub mod classes;
pub mod registrations;
