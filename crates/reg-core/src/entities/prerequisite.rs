use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A directed edge: `prerequisite_id` must be taken before `course_id`.
///
/// Never mutated in place; removed and re-added instead.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrerequisiteEdge {
    pub id: String,
    pub course_id: String,
    pub prerequisite_id: String,
    pub created_at: DateTime<Utc>,
}
