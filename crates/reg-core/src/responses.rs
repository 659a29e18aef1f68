//! Response types returned by the service layer and printed by `reg`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Course;

/// Minimal course reference used in prerequisite reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            code: course.code.clone(),
            name: course.name.clone(),
        }
    }
}

/// A course with its direct prerequisites, each expanded recursively.
///
/// A prerequisite shared by two branches appears under both. Depth is
/// bounded only by the acyclic invariant of the prerequisite graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrerequisiteChain {
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub direct_prerequisites: Vec<PrerequisiteChain>,
}

impl PrerequisiteChain {
    /// Number of levels below this node (0 for a course without prerequisites).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.direct_prerequisites
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Response from `reg prereq check`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrerequisiteCheck {
    pub course_id: String,
    pub student_id: String,
    pub all_prerequisites_met: bool,
    /// Unmet prerequisites in closure discovery order.
    pub missing_prerequisites: Vec<CourseSummary>,
}

/// Response from `reg course availability`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseAvailability {
    pub course_id: String,
    pub course_code: String,
    pub max_students: u32,
    pub enrolled_count: u32,
    pub available_seats: u32,
}
