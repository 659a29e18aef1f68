//! Prerequisite repository: edge validation, closure, chain, and checks.
//!
//! Every operation loads a fresh [`PrerequisiteGraph`] snapshot inside its
//! transaction and hands it to the pure traversals in `reg_core::graph`.

use chrono::Utc;

use reg_core::enrollment::unmet_prerequisites;
use reg_core::entities::{Course, PrerequisiteEdge};
use reg_core::enums::EntityType;
use reg_core::errors::CoreError;
use reg_core::graph::{PrerequisiteGraph, all_prerequisites, build_chain, would_create_cycle};
use reg_core::ids::PREFIX_PREREQUISITE;
use reg_core::responses::{CourseSummary, PrerequisiteChain, PrerequisiteCheck};

use crate::error::DatabaseError;
use crate::helpers::{ensure_exists, generate_id, parse_datetime};
use crate::repos::course::{get_course, get_courses};
use crate::repos::enrollment::list_enrollments;
use crate::service::RegistrarService;

const SELECT_COLS: &str = "id, course_id, prerequisite_id, created_at";

fn row_to_edge(row: &libsql::Row) -> Result<PrerequisiteEdge, DatabaseError> {
    Ok(PrerequisiteEdge {
        id: row.get(0)?,
        course_id: row.get(1)?,
        prerequisite_id: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

/// Look up the edge for an ordered pair.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_edge(
    conn: &libsql::Connection,
    course_id: &str,
    prerequisite_id: &str,
) -> Result<Option<PrerequisiteEdge>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM course_prerequisites
                 WHERE course_id = ?1 AND prerequisite_id = ?2"
            ),
            [course_id, prerequisite_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_edge(&row)?)),
        None => Ok(None),
    }
}

/// Direct prerequisite edges of `course_id`, in insertion order.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn list_direct_prerequisites(
    conn: &libsql::Connection,
    course_id: &str,
) -> Result<Vec<PrerequisiteEdge>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM course_prerequisites WHERE course_id = ?1 ORDER BY rowid"
            ),
            [course_id],
        )
        .await?;
    let mut edges = Vec::new();
    while let Some(row) = rows.next().await? {
        edges.push(row_to_edge(&row)?);
    }
    Ok(edges)
}

/// Snapshot every edge into an adjacency graph, preserving insertion order.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn load_graph(conn: &libsql::Connection) -> Result<PrerequisiteGraph, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT course_id, prerequisite_id FROM course_prerequisites ORDER BY rowid",
            (),
        )
        .await?;
    let mut graph = PrerequisiteGraph::new();
    while let Some(row) = rows.next().await? {
        graph.add_edge(row.get::<String>(0)?, row.get::<String>(1)?);
    }
    Ok(graph)
}

/// Persist an edge. Callers validate first.
///
/// # Errors
///
/// Returns `Conflict` if the pair already exists.
pub async fn insert_edge(
    conn: &libsql::Connection,
    course_id: &str,
    prerequisite_id: &str,
) -> Result<PrerequisiteEdge, DatabaseError> {
    let edge = PrerequisiteEdge {
        id: generate_id(conn, PREFIX_PREREQUISITE).await?,
        course_id: course_id.to_string(),
        prerequisite_id: prerequisite_id.to_string(),
        created_at: Utc::now(),
    };
    conn.execute(
        &format!("INSERT INTO course_prerequisites ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
        libsql::params![
            edge.id.as_str(),
            course_id,
            prerequisite_id,
            edge.created_at.to_rfc3339()
        ],
    )
    .await
    .map_err(|e| {
        DatabaseError::from_write(e, || {
            format!("{prerequisite_id} is already a prerequisite of {course_id}")
        })
    })?;
    Ok(edge)
}

/// Delete an edge by id.
///
/// # Errors
///
/// Returns `DatabaseError` if the statement fails.
pub async fn delete_edge(conn: &libsql::Connection, edge_id: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM course_prerequisites WHERE id = ?1", [edge_id])
        .await?;
    Ok(())
}

/// Validate and insert `course_id → prerequisite_id`. First failing check wins.
async fn add_edge_checked(
    conn: &libsql::Connection,
    course_id: &str,
    prerequisite_id: &str,
) -> Result<PrerequisiteEdge, DatabaseError> {
    ensure_exists(conn, EntityType::Course, course_id).await?;
    ensure_exists(conn, EntityType::Course, prerequisite_id).await?;

    if course_id == prerequisite_id {
        tracing::debug!(course_id, "self-prerequisite rejected");
        return Err(CoreError::InvalidArgument(format!(
            "course {course_id} cannot be its own prerequisite"
        ))
        .into());
    }

    if find_edge(conn, course_id, prerequisite_id).await?.is_some() {
        tracing::debug!(course_id, prerequisite_id, "duplicate prerequisite rejected");
        return Err(CoreError::Conflict(format!(
            "{prerequisite_id} is already a prerequisite of {course_id}"
        ))
        .into());
    }

    let graph = load_graph(conn).await?;
    if would_create_cycle(&graph, course_id, prerequisite_id) {
        tracing::debug!(course_id, prerequisite_id, "cyclic prerequisite rejected");
        return Err(CoreError::InvalidArgument(format!(
            "adding {prerequisite_id} as a prerequisite of {course_id} would create circular dependency"
        ))
        .into());
    }

    insert_edge(conn, course_id, prerequisite_id).await
}

async fn remove_edge_checked(
    conn: &libsql::Connection,
    course_id: &str,
    prerequisite_id: &str,
) -> Result<PrerequisiteEdge, DatabaseError> {
    let Some(edge) = find_edge(conn, course_id, prerequisite_id).await? else {
        tracing::debug!(course_id, prerequisite_id, "prerequisite edge missing");
        return Err(CoreError::not_found(
            EntityType::Prerequisite,
            format!("{course_id} -> {prerequisite_id}"),
        )
        .into());
    };
    delete_edge(conn, &edge.id).await?;
    Ok(edge)
}

/// Closure of `course_id` as ids, after checking the course exists.
async fn closure_of(conn: &libsql::Connection, course_id: &str) -> Result<Vec<String>, DatabaseError> {
    ensure_exists(conn, EntityType::Course, course_id).await?;
    let graph = load_graph(conn).await?;
    Ok(all_prerequisites(&graph, course_id))
}

/// Resolve course ids to courses, keeping order.
async fn courses_in_order(
    conn: &libsql::Connection,
    ids: &[&str],
) -> Result<Vec<Course>, DatabaseError> {
    let mut courses = Vec::with_capacity(ids.len());
    for id in ids {
        courses.push(get_course(conn, id).await?);
    }
    Ok(courses)
}

async fn prerequisites_met(
    conn: &libsql::Connection,
    student_id: &str,
    course_id: &str,
) -> Result<(bool, Vec<Course>), DatabaseError> {
    let closure = closure_of(conn, course_id).await?;
    if closure.is_empty() {
        return Ok((true, Vec::new()));
    }
    let enrollments = list_enrollments(conn, student_id).await?;
    let missing = unmet_prerequisites(&closure, &enrollments);
    let missing = courses_in_order(conn, &missing).await?;
    Ok((missing.is_empty(), missing))
}

async fn chain_of(conn: &libsql::Connection, course_id: &str) -> Result<PrerequisiteChain, DatabaseError> {
    let graph = load_graph(conn).await?;
    let closure = all_prerequisites(&graph, course_id);
    let courses = get_courses(
        conn,
        std::iter::once(course_id).chain(closure.iter().map(String::as_str)),
    )
    .await?;
    Ok(build_chain(&graph, &courses, course_id)?)
}

impl RegistrarService {
    /// Add `prerequisite_id` as a requirement of `course_id`.
    ///
    /// Checks, in order: both courses exist (`NotFound`), not the same course
    /// (`InvalidArgument`), no existing edge (`Conflict`), no cycle
    /// (`InvalidArgument`).
    pub async fn add_prerequisite(
        &self,
        course_id: &str,
        prerequisite_id: &str,
    ) -> Result<PrerequisiteEdge, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = add_edge_checked(&tx, course_id, prerequisite_id).await;
        let edge = tx.finish(result).await?;

        tracing::info!(edge_id = %edge.id, course_id, prerequisite_id, "prerequisite added");
        Ok(edge)
    }

    /// Remove the edge for the ordered pair and return it.
    pub async fn remove_prerequisite(
        &self,
        course_id: &str,
        prerequisite_id: &str,
    ) -> Result<PrerequisiteEdge, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = remove_edge_checked(&tx, course_id, prerequisite_id).await;
        let edge = tx.finish(result).await?;

        tracing::info!(edge_id = %edge.id, course_id, prerequisite_id, "prerequisite removed");
        Ok(edge)
    }

    pub async fn list_direct_prerequisites(
        &self,
        course_id: &str,
    ) -> Result<Vec<PrerequisiteEdge>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            ensure_exists(&tx, EntityType::Course, course_id).await?;
            list_direct_prerequisites(&tx, course_id).await
        }
        .await;
        tx.finish(result).await
    }

    /// Every course required before `course_id`, in discovery order.
    pub async fn get_all_prerequisites(&self, course_id: &str) -> Result<Vec<Course>, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            let closure = closure_of(&tx, course_id).await?;
            let ids: Vec<&str> = closure.iter().map(String::as_str).collect();
            courses_in_order(&tx, &ids).await
        }
        .await;
        tx.finish(result).await
    }

    /// Nested prerequisite tree of `course_id`.
    pub async fn get_prerequisite_chain(
        &self,
        course_id: &str,
    ) -> Result<PrerequisiteChain, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = chain_of(&tx, course_id).await;
        tx.finish(result).await
    }

    /// Whether the student is enrolled in every course in the closure of
    /// `course_id`, and which courses are missing.
    pub async fn check_prerequisites_met(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<(bool, Vec<Course>), DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = prerequisites_met(&tx, student_id, course_id).await;
        tx.finish(result).await
    }

    /// Like [`Self::check_prerequisites_met`], but also requires the student
    /// to exist and returns a summary report.
    pub async fn check_prerequisites(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<PrerequisiteCheck, DatabaseError> {
        let tx = self.db().begin_read().await?;
        let result = async {
            ensure_exists(&tx, EntityType::Course, course_id).await?;
            ensure_exists(&tx, EntityType::Student, student_id).await?;
            prerequisites_met(&tx, student_id, course_id).await
        }
        .await;
        let (all_prerequisites_met, missing) = tx.finish(result).await?;

        Ok(PrerequisiteCheck {
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            all_prerequisites_met,
            missing_prerequisites: missing.iter().map(CourseSummary::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::errors::ErrorKind;

    use super::*;
    use crate::test_support::{seed_course, seed_department, test_service};

    /// Departments plus courses A, B, C with B → A and C → B.
    async fn abc(svc: &RegistrarService) -> (Course, Course, Course) {
        let dept = seed_department(svc).await;
        let a = seed_course(svc, &dept.id, "A100", None).await;
        let b = seed_course(svc, &dept.id, "B200", None).await;
        let c = seed_course(svc, &dept.id, "C300", None).await;
        svc.add_prerequisite(&b.id, &a.id).await.unwrap();
        svc.add_prerequisite(&c.id, &b.id).await.unwrap();
        (a, b, c)
    }

    #[tokio::test]
    async fn add_prerequisite_persists_edge() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        let a = seed_course(&svc, &dept.id, "A100", None).await;
        let b = seed_course(&svc, &dept.id, "B200", None).await;

        let edge = svc.add_prerequisite(&b.id, &a.id).await.unwrap();
        assert!(edge.id.starts_with("pre-"));
        assert_eq!(edge.course_id, b.id);
        assert_eq!(edge.prerequisite_id, a.id);

        let direct = svc.list_direct_prerequisites(&b.id).await.unwrap();
        assert_eq!(direct, vec![edge]);
    }

    #[tokio::test]
    async fn unknown_course_is_checked_before_self_reference() {
        let svc = test_service().await;
        let err = svc
            .add_prerequisite("crs-00000000", "crs-00000000")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn unknown_prerequisite_is_not_found() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        let a = seed_course(&svc, &dept.id, "A100", None).await;
        let err = svc.add_prerequisite(&a.id, "crs-00000000").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::NotFound { ref id, .. }) if id == "crs-00000000"
        ));
    }

    #[tokio::test]
    async fn self_prerequisite_is_invalid() {
        let svc = test_service().await;
        let dept = seed_department(&svc).await;
        let a = seed_course(&svc, &dept.id, "A100", None).await;
        let err = svc.add_prerequisite(&a.id, &a.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
    }

    #[tokio::test]
    async fn duplicate_edge_conflicts() {
        let svc = test_service().await;
        let (a, b, _) = abc(&svc).await;
        let err = svc.add_prerequisite(&b.id, &a.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn closing_edge_is_rejected_and_not_stored() {
        let svc = test_service().await;
        let (a, _, c) = abc(&svc).await;

        let err = svc.add_prerequisite(&a.id, &c.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
        assert!(err.to_string().contains("circular dependency"));
        assert!(svc.list_direct_prerequisites(&a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_prerequisites_in_discovery_order() {
        let svc = test_service().await;
        let (a, b, c) = abc(&svc).await;

        let ids: Vec<String> = svc
            .get_all_prerequisites(&c.id)
            .await
            .unwrap()
            .into_iter()
            .map(|course| course.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id.clone()]);
        assert!(svc.get_all_prerequisites(&a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closure_of_unknown_course_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_all_prerequisites("crs-00000000").await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
        let err = svc.list_direct_prerequisites("crs-00000000").await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn remove_prerequisite_then_missing() {
        let svc = test_service().await;
        let (a, b, _) = abc(&svc).await;

        let removed = svc.remove_prerequisite(&b.id, &a.id).await.unwrap();
        assert_eq!(removed.prerequisite_id, a.id);
        assert!(svc.list_direct_prerequisites(&b.id).await.unwrap().is_empty());

        let err = svc.remove_prerequisite(&b.id, &a.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn removing_an_edge_allows_the_reverse() {
        let svc = test_service().await;
        let (a, b, _) = abc(&svc).await;
        svc.remove_prerequisite(&b.id, &a.id).await.unwrap();
        svc.add_prerequisite(&a.id, &b.id).await.unwrap();
    }

    #[tokio::test]
    async fn chain_nests_direct_prerequisites() {
        let svc = test_service().await;
        let (a, b, c) = abc(&svc).await;

        let chain = svc.get_prerequisite_chain(&c.id).await.unwrap();
        assert_eq!(chain.course_code, c.code);
        assert_eq!(chain.depth(), 2);
        assert_eq!(chain.direct_prerequisites[0].course_id, b.id);
        assert_eq!(
            chain.direct_prerequisites[0].direct_prerequisites[0].course_id,
            a.id
        );

        let leaf = svc.get_prerequisite_chain(&a.id).await.unwrap();
        assert!(leaf.direct_prerequisites.is_empty());

        let err = svc.get_prerequisite_chain("crs-00000000").await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn no_prerequisites_is_met_for_anyone() {
        let svc = test_service().await;
        let (a, _, _) = abc(&svc).await;
        let (met, missing) = svc.check_prerequisites_met("stu-anyone", &a.id).await.unwrap();
        assert!(met);
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn check_prerequisites_requires_student() {
        let svc = test_service().await;
        let (_, _, c) = abc(&svc).await;
        let err = svc.check_prerequisites("stu-00000000", &c.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }
}
