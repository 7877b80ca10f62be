//! Request-side domain types
//!
//! Raw request values are converted here before they reach the database.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod class;
pub mod student;

pub use validation::{parse_date, ValidationError, DATE_FORMAT};
pub use class::NewClass;
pub use student::{NewStudent, StudentChanges};
