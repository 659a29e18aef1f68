use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EnrollmentStatus;

/// The single enrollment row for a (student, course) pair.
///
/// Dropping flips `status`; re-enrolling flips it back on the same row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    /// Start of the most recent enrolled period.
    pub enrolled_at: DateTime<Utc>,
}
