//! Enrollment state machine.
//!
//! The decisions are pure functions of the current row, the course's active
//! enrollment count, and its capacity. `reg-db` reads those inside a write
//! transaction, asks for a plan, and applies it before committing.

use std::collections::HashSet;

use crate::entities::Enrollment;
use crate::enums::EnrollmentStatus;
use crate::errors::CoreError;

/// What `create_enrollment` should do for a (student, course) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentPlan {
    /// No row exists yet: insert a new `enrolled` row.
    Create,
    /// A dropped row exists: flip it back to `enrolled`, keeping its id.
    Reactivate { enrollment_id: String },
}

/// What `drop_enrollment` should do with an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlan {
    /// Flip `enrolled → dropped`.
    Drop,
    /// Row is already dropped; return it unchanged.
    AlreadyDropped,
}

/// Decide the transition for an enrollment request.
///
/// A duplicate active enrollment is rejected before capacity is considered.
///
/// # Errors
///
/// Returns `CoreError::Conflict` when the student is already enrolled or the
/// course has no free seat.
pub fn plan_enrollment(
    existing: Option<&Enrollment>,
    active_count: u32,
    max_students: u32,
) -> Result<EnrollmentPlan, CoreError> {
    match existing {
        Some(row) if row.status.is_active() => Err(CoreError::Conflict(format!(
            "student {} is already enrolled in course {}",
            row.student_id, row.course_id
        ))),
        Some(row) => {
            ensure_seat_available(active_count, max_students)?;
            Ok(EnrollmentPlan::Reactivate {
                enrollment_id: row.id.clone(),
            })
        }
        None => {
            ensure_seat_available(active_count, max_students)?;
            Ok(EnrollmentPlan::Create)
        }
    }
}

/// Decide what dropping `enrollment` means. Dropping twice is not an error.
#[must_use]
pub fn plan_drop(enrollment: &Enrollment) -> DropPlan {
    if enrollment
        .status
        .can_transition_to(EnrollmentStatus::Dropped)
    {
        DropPlan::Drop
    } else {
        DropPlan::AlreadyDropped
    }
}

/// Require at least one free seat.
///
/// # Errors
///
/// Returns `CoreError::Conflict` ("course is full") when `active_count >= max_students`.
pub fn ensure_seat_available(active_count: u32, max_students: u32) -> Result<(), CoreError> {
    if active_count >= max_students {
        return Err(CoreError::Conflict(format!(
            "course is full ({max_students} seats)"
        )));
    }
    Ok(())
}

/// Require a new capacity to still hold everyone currently enrolled.
///
/// # Errors
///
/// Returns `CoreError::Conflict` when `new_max_students < active_count`.
pub fn ensure_capacity_covers(active_count: u32, new_max_students: u32) -> Result<(), CoreError> {
    if new_max_students < active_count {
        return Err(CoreError::Conflict(format!(
            "cannot lower max_students to {new_max_students}: {active_count} students are enrolled"
        )));
    }
    Ok(())
}

/// Courses in `closure` the student is not actively enrolled in.
///
/// Keeps the closure's order.
#[must_use]
pub fn unmet_prerequisites<'c>(closure: &'c [String], enrollments: &[Enrollment]) -> Vec<&'c str> {
    let active: HashSet<&str> = enrollments
        .iter()
        .filter(|e| e.status.is_active())
        .map(|e| e.course_id.as_str())
        .collect();
    closure
        .iter()
        .map(String::as_str)
        .filter(|id| !active.contains(id))
        .collect()
}
