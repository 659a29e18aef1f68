use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A course offered in a semester, with a seat capacity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Credit hours: 1 to 6.
    pub credits: u8,
    pub department_id: String,
    /// Seat capacity. Active enrollments never exceed this.
    pub max_students: u32,
    /// Term label, e.g. `"Fall 2026"`.
    pub semester: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a course. `max_students` falls back to the configured default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: u8,
    pub department_id: String,
    pub max_students: Option<u32>,
    pub semester: String,
}
