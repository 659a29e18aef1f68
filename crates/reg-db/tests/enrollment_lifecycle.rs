//! Enrollment lifecycle integration tests.
//!
//! - Capacity: a course never holds more active enrollments than seats,
//!   including under concurrent requests
//! - Reactivation: a dropped enrollment comes back on the same row
//! - Drop: soft delete, idempotent

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokio::task::JoinSet;

use reg_config::EnrollmentConfig;
use reg_core::entities::{Course, NewCourse, NewStudent, Student};
use reg_core::enums::EnrollmentStatus;
use reg_core::errors::ErrorKind;
use reg_db::service::RegistrarService;

async fn test_service() -> RegistrarService {
    RegistrarService::new_local(":memory:", EnrollmentConfig::default())
        .await
        .unwrap()
}

async fn course_with_seats(svc: &RegistrarService, seats: u32) -> Course {
    let dept = svc.create_department("CS", "Computer Science").await.unwrap();
    svc.create_course(NewCourse {
        code: "CS410".to_string(),
        name: "Operating Systems".to_string(),
        credits: 4,
        department_id: dept.id,
        max_students: Some(seats),
        semester: "Fall 2026".to_string(),
    })
    .await
    .unwrap()
}

async fn students(svc: &RegistrarService, department_id: &str, count: u32) -> Vec<Student> {
    let mut out = Vec::new();
    for n in 1..=count {
        let student = svc
            .create_student(NewStudent {
                student_number: format!("S{n:05}"),
                name: format!("Student {n}"),
                email: format!("s{n}@example.edu"),
                department_id: department_id.to_string(),
            })
            .await
            .unwrap();
        out.push(student);
    }
    out
}

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_seat_course_turns_away_the_third_student() {
    let svc = test_service().await;
    let course = course_with_seats(&svc, 2).await;
    let roster = students(&svc, &course.department_id, 3).await;

    svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();
    svc.create_enrollment(&roster[1].id, &course.id).await.unwrap();
    let err = svc
        .create_enrollment(&roster[2].id, &course.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Conflict));
    assert!(err.to_string().contains("course is full"));
    let availability = svc.get_course_availability(&course.id).await.unwrap();
    assert_eq!(availability.enrolled_count, 2);
    assert_eq!(availability.available_seats, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_never_overfill() {
    const SEATS: u32 = 5;
    let svc = Arc::new(test_service().await);
    let course = course_with_seats(&svc, SEATS).await;
    let roster = students(&svc, &course.department_id, SEATS + 3).await;

    let mut set = JoinSet::new();
    for student in roster {
        let svc = Arc::clone(&svc);
        let course_id = course.id.clone();
        set.spawn(async move { svc.create_enrollment(&student.id, &course_id).await });
    }

    let mut accepted = 0;
    let mut full = 0;
    while let Some(joined) = set.join_next().await {
        match joined.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => {
                assert_eq!(e.kind(), Some(ErrorKind::Conflict));
                full += 1;
            }
        }
    }

    assert_eq!(accepted, SEATS);
    assert_eq!(full, 3);
    assert_eq!(
        svc.list_students_in_course(&course.id).await.unwrap().len(),
        SEATS as usize
    );
}

#[tokio::test]
async fn dropping_frees_a_seat() {
    let svc = test_service().await;
    let course = course_with_seats(&svc, 1).await;
    let roster = students(&svc, &course.department_id, 2).await;

    let first = svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();
    assert!(svc.create_enrollment(&roster[1].id, &course.id).await.is_err());

    svc.drop_enrollment(&first.id).await.unwrap();
    let second = svc.create_enrollment(&roster[1].id, &course.id).await.unwrap();
    assert_eq!(second.status, EnrollmentStatus::Enrolled);
}

// ---------------------------------------------------------------------------
// Reactivation and drop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reactivation_reuses_the_row() {
    let svc = test_service().await;
    let course = course_with_seats(&svc, 10).await;
    let roster = students(&svc, &course.department_id, 1).await;

    let original = svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();
    svc.drop_enrollment(&original.id).await.unwrap();
    let again = svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();

    assert_eq!(again.id, original.id);
    assert_eq!(again.status, EnrollmentStatus::Enrolled);
    assert!(again.enrolled_at >= original.enrolled_at);
    assert_eq!(
        svc.list_student_enrollments(&roster[0].id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn reactivation_rechecks_capacity() {
    let svc = test_service().await;
    let course = course_with_seats(&svc, 1).await;
    let roster = students(&svc, &course.department_id, 2).await;

    let first = svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();
    svc.drop_enrollment(&first.id).await.unwrap();
    svc.create_enrollment(&roster[1].id, &course.id).await.unwrap();

    let err = svc
        .create_enrollment(&roster[0].id, &course.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Conflict));
    assert_eq!(
        svc.get_enrollment(&first.id).await.unwrap().status,
        EnrollmentStatus::Dropped
    );
}

#[tokio::test]
async fn dropping_twice_is_not_an_error() {
    let svc = test_service().await;
    let course = course_with_seats(&svc, 3).await;
    let roster = students(&svc, &course.department_id, 1).await;
    let enrollment = svc.create_enrollment(&roster[0].id, &course.id).await.unwrap();

    let once = svc.drop_enrollment(&enrollment.id).await.unwrap();
    let twice = svc.drop_enrollment(&enrollment.id).await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.status, EnrollmentStatus::Dropped);
}
