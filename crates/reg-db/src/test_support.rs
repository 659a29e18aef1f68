//! Shared test utilities for reg-db unit tests.

use reg_config::EnrollmentConfig;
use reg_core::entities::{Course, Department, NewCourse, NewStudent, Student};

use crate::RegDb;
use crate::service::RegistrarService;

/// In-memory service with default enrollment settings.
pub async fn test_service() -> RegistrarService {
    let db = RegDb::open_local(":memory:").await.unwrap();
    RegistrarService::from_db(db, EnrollmentConfig::default())
}

pub async fn seed_department(svc: &RegistrarService) -> Department {
    svc.create_department("CS", "Computer Science").await.unwrap()
}

/// Create a course in `department_id` with the given code and capacity.
pub async fn seed_course(
    svc: &RegistrarService,
    department_id: &str,
    code: &str,
    max_students: Option<u32>,
) -> Course {
    svc.create_course(NewCourse {
        code: code.to_string(),
        name: format!("Course {code}"),
        credits: 3,
        department_id: department_id.to_string(),
        max_students,
        semester: "Fall 2026".to_string(),
    })
    .await
    .unwrap()
}

/// Create a student whose number and email derive from `n`.
pub async fn seed_student(svc: &RegistrarService, department_id: &str, n: u32) -> Student {
    svc.create_student(NewStudent {
        student_number: format!("S{n:05}"),
        name: format!("Student {n}"),
        email: format!("student{n}@example.edu"),
        department_id: department_id.to_string(),
    })
    .await
    .unwrap()
}
