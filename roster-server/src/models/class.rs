//! Class input types

/// Fields for creating or fully replacing a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub code: String,
    pub title: String,
    pub description: String,
    pub max_students: i64,
}

impl NewClass {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        max_students: i64,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            max_students,
        }
    }
}
