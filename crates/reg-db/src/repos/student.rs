//! Student repository.

use chrono::Utc;

use reg_core::entities::{NewStudent, Student};
use reg_core::enums::EntityType;
use reg_core::errors::CoreError;
use reg_core::ids::PREFIX_STUDENT;
use reg_core::validation::{STUDENT_NAME_LEN, STUDENT_NUMBER_LEN, validate_email, validate_length};

use crate::error::DatabaseError;
use crate::helpers::{contains_pattern, ensure_exists, generate_id, parse_datetime};
use crate::service::RegistrarService;

const SELECT_COLS: &str = "id, student_number, name, email, department_id, created_at";

const DEFAULT_LIST_LIMIT: u32 = 100;

/// Filter criteria for student listings. Unset fields match every student.
#[derive(Debug, Default, Clone)]
pub struct StudentFilter {
    pub department_id: Option<String>,
    /// Case-insensitive substring of the name, email, or student number.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get(0)?,
        student_number: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        department_id: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Load one student.
///
/// # Errors
///
/// Returns `NotFound` if no student has this id.
pub async fn get_student(conn: &libsql::Connection, id: &str) -> Result<Student, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM students WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| CoreError::not_found(EntityType::Student, id))?;
    row_to_student(&row)
}

/// Students actively enrolled in `course_id`, by student number.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn list_enrolled_students(
    conn: &libsql::Connection,
    course_id: &str,
) -> Result<Vec<Student>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT s.id, s.student_number, s.name, s.email, s.department_id, s.created_at
             FROM students s
             JOIN enrollments e ON e.student_id = s.id
             WHERE e.course_id = ?1 AND e.status = 'enrolled'
             ORDER BY s.student_number",
            [course_id],
        )
        .await?;
    let mut students = Vec::new();
    while let Some(row) = rows.next().await? {
        students.push(row_to_student(&row)?);
    }
    Ok(students)
}

fn validate_new_student(new: &NewStudent) -> Result<(), CoreError> {
    validate_length("student_number", &new.student_number, STUDENT_NUMBER_LEN)?;
    validate_length("name", &new.name, STUDENT_NAME_LEN)?;
    validate_email(&new.email)
}

async fn query_students(
    conn: &libsql::Connection,
    filter: &StudentFilter,
) -> Result<Vec<Student>, DatabaseError> {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(ref department_id) = filter.department_id {
        params.push(libsql::Value::Text(department_id.clone()));
        conditions.push(format!("department_id = ?{}", params.len()));
    }
    if let Some(ref search) = filter.search {
        params.push(libsql::Value::Text(contains_pattern(search)));
        let n = params.len();
        conditions.push(format!(
            "(name LIKE ?{n} ESCAPE '\\' OR email LIKE ?{n} ESCAPE '\\' \
             OR student_number LIKE ?{n} ESCAPE '\\')"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let sql = format!(
        "SELECT {SELECT_COLS} FROM students {where_clause} ORDER BY student_number LIMIT {limit}"
    );

    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut students = Vec::new();
    while let Some(row) = rows.next().await? {
        students.push(row_to_student(&row)?);
    }
    Ok(students)
}

async fn insert_student(conn: &libsql::Connection, new: NewStudent) -> Result<Student, DatabaseError> {
    ensure_exists(conn, EntityType::Department, &new.department_id).await?;

    let student = Student {
        id: generate_id(conn, PREFIX_STUDENT).await?,
        student_number: new.student_number,
        name: new.name,
        email: new.email,
        department_id: new.department_id,
        created_at: Utc::now(),
    };
    conn.execute(
        &format!("INSERT INTO students ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        libsql::params![
            student.id.as_str(),
            student.student_number.as_str(),
            student.name.as_str(),
            student.email.as_str(),
            student.department_id.as_str(),
            student.created_at.to_rfc3339()
        ],
    )
    .await
    .map_err(|e| {
        DatabaseError::from_write(e, || {
            format!(
                "a student with number '{}' or email '{}' already exists",
                student.student_number, student.email
            )
        })
    })?;
    Ok(student)
}

impl RegistrarService {
    pub async fn create_student(&self, new: NewStudent) -> Result<Student, DatabaseError> {
        validate_new_student(&new)?;

        let tx = self.db().begin_write().await?;
        let result = insert_student(&tx, new).await;
        let student = tx.finish(result).await?;

        tracing::info!(student_id = %student.id, student_number = %student.student_number, "student created");
        Ok(student)
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = get_student(&tx, id).await;
        tx.finish(result).await
    }

    /// Students matching `filter`, ordered by student number.
    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = query_students(&tx, filter).await;
        tx.finish(result).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::errors::ErrorKind;
    use rstest::rstest;

    use super::*;
    use crate::test_support::{seed_department, seed_student, test_service};

    #[tokio::test]
    async fn create_student_roundtrip() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        let student = seed_student(&svc, &dept.id, 7).await;
        assert!(student.id.starts_with("stu-"));
        assert_eq!(student.student_number, "S00007");

        let fetched = svc.get_student(&student.id).await.unwrap();
        assert_eq!(fetched, student);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        seed_student(&svc, &dept.id, 1).await;

        let err = svc
            .create_student(NewStudent {
                student_number: "S99999".to_string(),
                name: "Copycat".to_string(),
                email: "student1@example.edu".to_string(),
                department_id: dept.id.clone(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Conflict));
        assert_eq!(svc.list_students(&StudentFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_student_number_conflicts() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        seed_student(&svc, &dept.id, 1).await;

        let err = svc
            .create_student(NewStudent {
                student_number: "S00001".to_string(),
                name: "Other".to_string(),
                email: "other@example.edu".to_string(),
                department_id: dept.id.clone(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Conflict));
    }

    #[rstest]
    #[case::no_at("S00001", "No Mail", "nobody")]
    #[case::no_tld("S00001", "No Mail", "nobody@localhost")]
    #[case::space("S00001", "No Mail", "no body@example.edu")]
    #[case::short_number("S001", "Short", "short@example.edu")]
    #[case::short_name("S00001", "X", "x@example.edu")]
    #[tokio::test]
    async fn malformed_fields_are_invalid(
        #[case] student_number: &str,
        #[case] name: &str,
        #[case] email: &str,
    ) {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        let err = svc
            .create_student(NewStudent {
                student_number: student_number.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                department_id: dept.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
    }

    #[tokio::test]
    async fn unknown_department_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_student(NewStudent {
                student_number: "S00001".to_string(),
                name: "Lost".to_string(),
                email: "lost@example.edu".to_string(),
                department_id: "dpt-00000000".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn list_students_filters_in_query() {
        let svc = test_service().await;
        let cs = seed_department(&svc).await;
        let math = svc.create_department("MA", "Mathematics").await.unwrap();
        for n in 0..6 {
            seed_student(&svc, &cs.id, n).await;
        }
        let ada = svc
            .create_student(NewStudent {
                student_number: "S99999".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@math.example.edu".to_string(),
                department_id: math.id.clone(),
            })
            .await
            .unwrap();

        let in_math = StudentFilter {
            department_id: Some(math.id.clone()),
            limit: Some(1),
            ..StudentFilter::default()
        };
        assert_eq!(svc.list_students(&in_math).await.unwrap(), vec![ada.clone()]);

        let by_name = StudentFilter {
            search: Some("LOVELACE".to_string()),
            ..StudentFilter::default()
        };
        assert_eq!(svc.list_students(&by_name).await.unwrap(), vec![ada]);

        let by_number = StudentFilter {
            search: Some("S0000".to_string()),
            department_id: Some(cs.id.clone()),
            limit: Some(3),
            ..StudentFilter::default()
        };
        let numbers: Vec<String> = svc
            .list_students(&by_number)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.student_number)
            .collect();
        assert_eq!(numbers, vec!["S00000", "S00001", "S00002"]);
    }
}
