//! Course update builder.

use serde::{Deserialize, Serialize};

/// Partial change to a course. The department is fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

impl CourseUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.credits.is_none()
            && self.max_students.is_none()
            && self.semester.is_none()
    }
}

#[derive(Debug, Default)]
pub struct CourseUpdateBuilder(CourseUpdate);

impl CourseUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CourseUpdate::default())
    }

    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.0.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn credits(mut self, credits: u8) -> Self {
        self.0.credits = Some(credits);
        self
    }

    #[must_use]
    pub fn max_students(mut self, max_students: u32) -> Self {
        self.0.max_students = Some(max_students);
        self
    }

    #[must_use]
    pub fn semester(mut self, semester: impl Into<String>) -> Self {
        self.0.semester = Some(semester.into());
        self
    }

    #[must_use]
    pub fn build(self) -> CourseUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_requested_fields() {
        let update = CourseUpdateBuilder::new().max_students(40).build();
        assert_eq!(update.max_students, Some(40));
        assert!(update.name.is_none());
        assert!(!update.is_empty());
        assert!(CourseUpdateBuilder::new().build().is_empty());
    }

    #[test]
    fn serializes_changed_fields_only() {
        let update = CourseUpdateBuilder::new().name("Data Structures").build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Data Structures" }));
    }
}
