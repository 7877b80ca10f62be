//! Validation error types

use std::fmt;

use chrono::NaiveDate;

/// Date format used on the wire and in storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Value doesn't match required format (e.g., ISO date)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request parameters could not be decoded (missing or mistyped field)
    InvalidParams { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidParams { reason } => write!(f, "invalid parameters: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field,
            reason: "expected a date in YYYY-MM-DD format",
        }
    })
}
