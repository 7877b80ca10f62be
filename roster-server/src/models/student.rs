//! Student input types

use chrono::NaiveDate;

use super::validation::{parse_date, ValidationError};

/// Fields for creating or fully replacing a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl NewStudent {
    /// Build from raw request values, parsing the birth date.
    ///
    /// # Example
    /// ```
    /// use roster_server::models::NewStudent;
    ///
    /// assert!(NewStudent::parse("Ada", "Lovelace", "1815-12-10").is_ok());
    /// assert!(NewStudent::parse("Ada", "Lovelace", "10/12/1815").is_err());
    /// ```
    pub fn parse(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: parse_date("birth_date", birth_date)?,
        })
    }
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl StudentChanges {
    pub fn parse(
        first_name: Option<String>,
        last_name: Option<String>,
        birth_date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let birth_date = birth_date
            .map(|d| parse_date("birth_date", d))
            .transpose()?;

        Ok(Self {
            first_name,
            last_name,
            birth_date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.birth_date.is_none()
    }
}
