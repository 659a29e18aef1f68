//! Course repository: CRUD plus capacity-aware updates.
//!
//! Course codes are unique. The column carries no constraint, so the check
//! runs inside the write transaction before every insert or code change.

use std::collections::HashMap;

use chrono::Utc;

use reg_core::enrollment::ensure_capacity_covers;
use reg_core::entities::{Course, NewCourse};
use reg_core::enums::EntityType;
use reg_core::errors::CoreError;
use reg_core::ids::PREFIX_COURSE;
use reg_core::validation::{
    COURSE_CODE_LEN, COURSE_NAME_LEN, validate_capacity, validate_credits, validate_length,
    validate_semester,
};

use crate::error::DatabaseError;
use crate::helpers::{contains_pattern, ensure_exists, generate_id, get_unsigned, parse_datetime};
use crate::repos::enrollment::count_active_enrollments;
use crate::service::RegistrarService;
use crate::updates::course::CourseUpdate;

const SELECT_COLS: &str =
    "id, code, name, credits, department_id, max_students, semester, created_at";

const DEFAULT_LIST_LIMIT: u32 = 100;

/// Filter criteria for course listings. Unset fields match every course.
#[derive(Debug, Default, Clone)]
pub struct CourseFilter {
    pub department_id: Option<String>,
    /// Department code, compared case-insensitively.
    pub department_code: Option<String>,
    pub semester: Option<String>,
    /// Case-insensitive substring of the course code or name.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_course(row: &libsql::Row) -> Result<Course, DatabaseError> {
    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        credits: get_unsigned(row, 3)?,
        department_id: row.get(4)?,
        max_students: get_unsigned(row, 5)?,
        semester: row.get(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Load one course.
///
/// # Errors
///
/// Returns `NotFound` if no course has this id.
pub async fn get_course(conn: &libsql::Connection, id: &str) -> Result<Course, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM courses WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Course, id))?;
    row_to_course(&row)
}

/// Load several courses keyed by id.
///
/// # Errors
///
/// Returns `NotFound` for the first id with no course.
pub async fn get_courses<'a, I>(
    conn: &libsql::Connection,
    ids: I,
) -> Result<HashMap<String, Course>, DatabaseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut courses = HashMap::new();
    for id in ids {
        if !courses.contains_key(id) {
            courses.insert(id.to_string(), get_course(conn, id).await?);
        }
    }
    Ok(courses)
}

/// Find the course with exactly this code, if any.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_course_by_code(
    conn: &libsql::Connection,
    code: &str,
) -> Result<Option<Course>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM courses WHERE code = ?1"), [code])
        .await?;
    rows.next().await?.map(|row| row_to_course(&row)).transpose()
}

async fn ensure_code_available(conn: &libsql::Connection, code: &str) -> Result<(), DatabaseError> {
    if let Some(existing) = find_course_by_code(conn, code).await? {
        tracing::debug!(code, existing_id = %existing.id, "course code taken");
        return Err(CoreError::Conflict(format!("course with code '{code}' already exists")).into());
    }
    Ok(())
}

fn validate_new_course(course: &NewCourse, max_students: u32) -> Result<(), CoreError> {
    validate_length("code", &course.code, COURSE_CODE_LEN)?;
    validate_length("name", &course.name, COURSE_NAME_LEN)?;
    validate_credits(course.credits)?;
    validate_capacity(max_students)?;
    validate_semester(&course.semester)?;
    Ok(())
}

fn validate_update(update: &CourseUpdate) -> Result<(), CoreError> {
    if let Some(code) = &update.code {
        validate_length("code", code, COURSE_CODE_LEN)?;
    }
    if let Some(name) = &update.name {
        validate_length("name", name, COURSE_NAME_LEN)?;
    }
    if let Some(credits) = update.credits {
        validate_credits(credits)?;
    }
    if let Some(max_students) = update.max_students {
        validate_capacity(max_students)?;
    }
    if let Some(semester) = &update.semester {
        validate_semester(semester)?;
    }
    Ok(())
}

async fn insert_course(conn: &libsql::Connection, new: NewCourse, max_students: u32) -> Result<Course, DatabaseError> {
    ensure_exists(conn, EntityType::Department, &new.department_id).await?;
    ensure_code_available(conn, &new.code).await?;

    let course = Course {
        id: generate_id(conn, PREFIX_COURSE).await?,
        code: new.code,
        name: new.name,
        credits: new.credits,
        department_id: new.department_id,
        max_students,
        semester: new.semester,
        created_at: Utc::now(),
    };
    conn.execute(
        &format!("INSERT INTO courses ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        libsql::params![
            course.id.as_str(),
            course.code.as_str(),
            course.name.as_str(),
            i64::from(course.credits),
            course.department_id.as_str(),
            i64::from(course.max_students),
            course.semester.as_str(),
            course.created_at.to_rfc3339()
        ],
    )
    .await
    .map_err(|e| DatabaseError::from_write(e, || format!("course id '{}' already exists", course.id)))?;
    Ok(course)
}

async fn apply_update(
    conn: &libsql::Connection,
    course_id: &str,
    update: &CourseUpdate,
) -> Result<Course, DatabaseError> {
    let current = get_course(conn, course_id).await?;
    if update.is_empty() {
        return Ok(current);
    }

    if let Some(code) = update.code.as_deref().filter(|code| *code != current.code) {
        ensure_code_available(conn, code).await?;
    }

    if let Some(max_students) = update.max_students {
        let active = count_active_enrollments(conn, course_id).await?;
        if let Err(e) = ensure_capacity_covers(active, max_students) {
            tracing::debug!(course_id, active, max_students, "capacity below enrolled count");
            return Err(e.into());
        }
    }

    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    let mut idx = 1usize;

    if let Some(ref code) = update.code {
        sets.push(format!("code = ?{idx}"));
        params.push(code.clone().into());
        idx += 1;
    }
    if let Some(ref name) = update.name {
        sets.push(format!("name = ?{idx}"));
        params.push(name.clone().into());
        idx += 1;
    }
    if let Some(credits) = update.credits {
        sets.push(format!("credits = ?{idx}"));
        params.push(i64::from(credits).into());
        idx += 1;
    }
    if let Some(max_students) = update.max_students {
        sets.push(format!("max_students = ?{idx}"));
        params.push(i64::from(max_students).into());
        idx += 1;
    }
    if let Some(ref semester) = update.semester {
        sets.push(format!("semester = ?{idx}"));
        params.push(semester.clone().into());
        idx += 1;
    }

    params.push(course_id.into());
    let sql = format!("UPDATE courses SET {} WHERE id = ?{idx}", sets.join(", "));
    conn.execute(&sql, libsql::params_from_iter(params)).await?;

    get_course(conn, course_id).await
}

async fn query_courses(
    conn: &libsql::Connection,
    filter: &CourseFilter,
) -> Result<Vec<Course>, DatabaseError> {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(ref department_id) = filter.department_id {
        params.push(libsql::Value::Text(department_id.clone()));
        conditions.push(format!("department_id = ?{}", params.len()));
    }
    if let Some(ref department_code) = filter.department_code {
        params.push(libsql::Value::Text(department_code.clone()));
        conditions.push(format!(
            "department_id IN (SELECT id FROM departments WHERE upper(code) = upper(?{}))",
            params.len()
        ));
    }
    if let Some(ref semester) = filter.semester {
        params.push(libsql::Value::Text(semester.clone()));
        conditions.push(format!("semester = ?{}", params.len()));
    }
    if let Some(ref search) = filter.search {
        params.push(libsql::Value::Text(contains_pattern(search)));
        let n = params.len();
        conditions.push(format!(
            "(code LIKE ?{n} ESCAPE '\\' OR name LIKE ?{n} ESCAPE '\\')"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let sql = format!(
        "SELECT {SELECT_COLS} FROM courses {where_clause} ORDER BY code, semester LIMIT {limit}"
    );

    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut courses = Vec::new();
    while let Some(row) = rows.next().await? {
        courses.push(row_to_course(&row)?);
    }
    Ok(courses)
}

async fn remove_course(conn: &libsql::Connection, course_id: &str) -> Result<Course, DatabaseError> {
    let course = get_course(conn, course_id).await?;

    let active = count_active_enrollments(conn, course_id).await?;
    if active > 0 {
        tracing::debug!(course_id, active, "course still has enrolled students");
        return Err(CoreError::Conflict(format!(
            "course {} has {active} enrolled students; drop them before deleting it",
            course.code
        ))
        .into());
    }

    // Dropped rows are history of this course only; edges cascade in the schema.
    conn.execute("DELETE FROM enrollments WHERE course_id = ?1", [course_id])
        .await?;
    conn.execute("DELETE FROM courses WHERE id = ?1", [course_id])
        .await?;
    Ok(course)
}

impl RegistrarService {
    /// Create a course. `max_students` defaults to the configured capacity.
    pub async fn create_course(&self, new: NewCourse) -> Result<Course, DatabaseError> {
        let max_students = new
            .max_students
            .unwrap_or(self.enrollment_config().default_max_students);
        validate_new_course(&new, max_students)?;

        let tx = self.db().begin_write().await?;
        let result = insert_course(&tx, new, max_students).await;
        let course = tx.finish(result).await?;

        tracing::info!(course_id = %course.id, code = %course.code, max_students, "course created");
        Ok(course)
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = get_course(&tx, id).await;
        tx.finish(result).await
    }

    /// Courses matching `filter`, ordered by code then semester.
    pub async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = query_courses(&tx, filter).await;
        tx.finish(result).await
    }

    /// Delete a course and return it.
    ///
    /// Prerequisite edges touching the course go with it, as do its dropped
    /// enrollments. A course with enrolled students is a `Conflict`.
    pub async fn delete_course(&self, course_id: &str) -> Result<Course, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = remove_course(&tx, course_id).await;
        let course = tx.finish(result).await?;

        tracing::info!(course_id, code = %course.code, "course deleted");
        Ok(course)
    }

    /// Apply a partial update. Lowering `max_students` below the number of
    /// enrolled students is a `Conflict`.
    pub async fn update_course(
        &self,
        course_id: &str,
        update: CourseUpdate,
    ) -> Result<Course, DatabaseError> {
        validate_update(&update)?;

        let tx = self.db().begin_write().await?;
        let result = apply_update(&tx, course_id, &update).await;
        let course = tx.finish(result).await?;

        tracing::info!(course_id, "course updated");
        Ok(course)
    }
}
