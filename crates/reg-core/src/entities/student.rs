use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student who can enroll in courses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    /// Institution-issued number, unique across students.
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub department_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewStudent {
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub department_id: String,
}
