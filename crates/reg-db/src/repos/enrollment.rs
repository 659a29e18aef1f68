//! Enrollment repository: the enrolled/dropped lifecycle and seat accounting.
//!
//! Decisions come from `reg_core::enrollment`; this module reads the inputs
//! and applies the plan inside one immediate transaction, so the capacity
//! check and the write cannot interleave with another writer.

use chrono::{DateTime, Utc};

use reg_core::enrollment::{DropPlan, EnrollmentPlan, plan_drop, plan_enrollment};
use reg_core::entities::{Enrollment, Student};
use reg_core::enums::{EnrollmentStatus, EntityType};
use reg_core::errors::CoreError;
use reg_core::ids::PREFIX_ENROLLMENT;
use reg_core::responses::CourseAvailability;

use crate::error::DatabaseError;
use crate::helpers::{ensure_exists, generate_id, get_unsigned, parse_datetime, parse_enum};
use crate::repos::course::get_course;
use crate::repos::student::{get_student, list_enrolled_students};
use crate::service::RegistrarService;

const SELECT_COLS: &str = "id, student_id, course_id, status, enrolled_at";

fn row_to_enrollment(row: &libsql::Row) -> Result<Enrollment, DatabaseError> {
    Ok(Enrollment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        course_id: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        enrolled_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Number of `enrolled` rows for a course.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn count_active_enrollments(
    conn: &libsql::Connection,
    course_id: &str,
) -> Result<u32, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM enrollments WHERE course_id = ?1 AND status = 'enrolled'",
            [course_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    get_unsigned(&row, 0)
}

/// The single row for a (student, course) pair, whatever its status.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_enrollment(
    conn: &libsql::Connection,
    student_id: &str,
    course_id: &str,
) -> Result<Option<Enrollment>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM enrollments WHERE student_id = ?1 AND course_id = ?2"
            ),
            [student_id, course_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_enrollment(&row)?)),
        None => Ok(None),
    }
}

/// Load one enrollment by id.
///
/// # Errors
///
/// Returns `NotFound` if no enrollment has this id.
pub async fn get_enrollment(conn: &libsql::Connection, id: &str) -> Result<Enrollment, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM enrollments WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Enrollment, id))?;
    row_to_enrollment(&row)
}

/// Insert a fresh `enrolled` row.
///
/// # Errors
///
/// Returns `Conflict` if a row for the pair already exists.
pub async fn insert_enrollment(
    conn: &libsql::Connection,
    student_id: &str,
    course_id: &str,
) -> Result<Enrollment, DatabaseError> {
    let enrollment = Enrollment {
        id: generate_id(conn, PREFIX_ENROLLMENT).await?,
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        status: EnrollmentStatus::Enrolled,
        enrolled_at: Utc::now(),
    };
    conn.execute(
        &format!("INSERT INTO enrollments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
        libsql::params![
            enrollment.id.as_str(),
            student_id,
            course_id,
            enrollment.status.as_str(),
            enrollment.enrolled_at.to_rfc3339()
        ],
    )
    .await
    .map_err(|e| {
        DatabaseError::from_write(e, || {
            format!("student {student_id} already has an enrollment in course {course_id}")
        })
    })?;
    Ok(enrollment)
}

/// Set the status of a row; `enrolled_at` is overwritten only when given.
///
/// # Errors
///
/// Returns `DatabaseError` if the statement fails.
pub async fn update_enrollment_status(
    conn: &libsql::Connection,
    enrollment_id: &str,
    status: EnrollmentStatus,
    enrolled_at: Option<DateTime<Utc>>,
) -> Result<(), DatabaseError> {
    match enrolled_at {
        Some(at) => {
            conn.execute(
                "UPDATE enrollments SET status = ?1, enrolled_at = ?2 WHERE id = ?3",
                libsql::params![status.as_str(), at.to_rfc3339(), enrollment_id],
            )
            .await?
        }
        None => {
            conn.execute(
                "UPDATE enrollments SET status = ?1 WHERE id = ?2",
                libsql::params![status.as_str(), enrollment_id],
            )
            .await?
        }
    };
    Ok(())
}

/// Every enrollment of a student, any status, oldest first.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn list_enrollments(
    conn: &libsql::Connection,
    student_id: &str,
) -> Result<Vec<Enrollment>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM enrollments WHERE student_id = ?1 ORDER BY rowid"),
            [student_id],
        )
        .await?;
    let mut enrollments = Vec::new();
    while let Some(row) = rows.next().await? {
        enrollments.push(row_to_enrollment(&row)?);
    }
    Ok(enrollments)
}

async fn enroll(
    conn: &libsql::Connection,
    student_id: &str,
    course_id: &str,
) -> Result<Enrollment, DatabaseError> {
    get_student(conn, student_id).await?;
    let course = get_course(conn, course_id).await?;

    let existing = find_enrollment(conn, student_id, course_id).await?;
    let active = count_active_enrollments(conn, course_id).await?;
    let plan = plan_enrollment(existing.as_ref(), active, course.max_students).inspect_err(|e| {
        tracing::debug!(student_id, course_id, active, max_students = course.max_students, error = %e, "enrollment rejected");
    })?;

    match plan {
        EnrollmentPlan::Create => insert_enrollment(conn, student_id, course_id).await,
        EnrollmentPlan::Reactivate { enrollment_id } => {
            let now = Utc::now();
            update_enrollment_status(conn, &enrollment_id, EnrollmentStatus::Enrolled, Some(now))
                .await?;
            get_enrollment(conn, &enrollment_id).await
        }
    }
}

async fn drop_by_id(conn: &libsql::Connection, enrollment_id: &str) -> Result<(Enrollment, DropPlan), DatabaseError> {
    let enrollment = get_enrollment(conn, enrollment_id).await?;
    let plan = plan_drop(&enrollment);
    if plan == DropPlan::AlreadyDropped {
        return Ok((enrollment, plan));
    }
    update_enrollment_status(conn, enrollment_id, EnrollmentStatus::Dropped, None).await?;
    Ok((
        Enrollment {
            status: EnrollmentStatus::Dropped,
            ..enrollment
        },
        plan,
    ))
}

async fn availability(
    conn: &libsql::Connection,
    course_id: &str,
) -> Result<CourseAvailability, DatabaseError> {
    let course = get_course(conn, course_id).await?;
    let enrolled_count = count_active_enrollments(conn, course_id).await?;
    Ok(CourseAvailability {
        course_id: course.id,
        course_code: course.code,
        max_students: course.max_students,
        enrolled_count,
        available_seats: course.max_students.saturating_sub(enrolled_count),
    })
}

impl RegistrarService {
    /// Enroll a student, or re-activate their dropped enrollment.
    ///
    /// An active duplicate is a `Conflict` regardless of capacity; otherwise a
    /// full course is a `Conflict`.
    pub async fn create_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = enroll(&tx, student_id, course_id).await;
        let enrollment = tx.finish(result).await?;

        tracing::info!(enrollment_id = %enrollment.id, student_id, course_id, "student enrolled");
        Ok(enrollment)
    }

    /// Drop an enrollment. Dropping an already dropped enrollment returns it unchanged.
    pub async fn drop_enrollment(&self, enrollment_id: &str) -> Result<Enrollment, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = drop_by_id(&tx, enrollment_id).await;
        let (enrollment, plan) = tx.finish(result).await?;

        match plan {
            DropPlan::Drop => tracing::info!(enrollment_id, "enrollment dropped"),
            DropPlan::AlreadyDropped => tracing::debug!(enrollment_id, "enrollment already dropped"),
        }
        Ok(enrollment)
    }

    pub async fn get_enrollment(&self, id: &str) -> Result<Enrollment, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = get_enrollment(&tx, id).await;
        tx.finish(result).await
    }

    pub async fn list_student_enrollments(
        &self,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            ensure_exists(&tx, EntityType::Student, student_id).await?;
            list_enrollments(&tx, student_id).await
        }
        .await;
        tx.finish(result).await
    }

    /// Students with an active enrollment in the course.
    pub async fn list_students_in_course(&self, course_id: &str) -> Result<Vec<Student>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            ensure_exists(&tx, EntityType::Course, course_id).await?;
            list_enrolled_students(&tx, course_id).await
        }
        .await;
        tx.finish(result).await
    }

    pub async fn get_course_availability(
        &self,
        course_id: &str,
    ) -> Result<CourseAvailability, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = availability(&tx, course_id).await;
        tx.finish(result).await
    }
}
