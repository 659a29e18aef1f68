//! Enrollment and course capacity defaults.

use serde::{Deserialize, Serialize};

/// Seats given to a course created without an explicit capacity.
const fn default_max_students() -> u32 {
    30
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct EnrollmentConfig {
    /// Capacity for new courses that do not specify `max_students`.
    #[serde(default = "default_max_students")]
    pub default_max_students: u32,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            default_max_students: default_max_students(),
        }
    }
}
