use std::collections::HashMap;

use super::GraphAccessor;
use crate::entities::Course;
use crate::enums::EntityType;
use crate::errors::CoreError;
use crate::responses::PrerequisiteChain;

/// Expand `course_id` into a nested [`PrerequisiteChain`].
///
/// `courses` must hold every course in the closure of `course_id`, plus the
/// course itself.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if a course on the chain is missing from `courses`.
pub fn build_chain<G>(
    graph: &G,
    courses: &HashMap<String, Course>,
    course_id: &str,
) -> Result<PrerequisiteChain, CoreError>
where
    G: GraphAccessor + ?Sized,
{
    let course = courses
        .get(course_id)
        .ok_or_else(|| CoreError::not_found(EntityType::Course, course_id))?;

    let direct_prerequisites = graph
        .edges_from(course_id)
        .iter()
        .map(|prerequisite_id| build_chain(graph, courses, prerequisite_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PrerequisiteChain {
        course_id: course.id.clone(),
        course_code: course.code.clone(),
        course_name: course.name.clone(),
        direct_prerequisites,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::PrerequisiteGraph;

    fn course(id: &str) -> Course {
        Course {
            id: id.to_string(),
            code: id.to_uppercase(),
            name: format!("Course {id}"),
            credits: 3,
            department_id: "dpt-1".to_string(),
            max_students: 30,
            semester: "Fall 2026".to_string(),
            created_at: Utc::now(),
        }
    }

    fn catalog(ids: &[&str]) -> HashMap<String, Course> {
        ids.iter().map(|id| ((*id).to_string(), course(id))).collect()
    }

    #[test]
    fn nests_each_level() {
        let graph = PrerequisiteGraph::from_edges([("c", "b"), ("b", "a")]);
        let chain = build_chain(&graph, &catalog(&["a", "b", "c"]), "c").unwrap();

        assert_eq!(chain.course_code, "C");
        assert_eq!(chain.direct_prerequisites.len(), 1);
        let b = &chain.direct_prerequisites[0];
        assert_eq!(b.course_id, "b");
        assert_eq!(b.direct_prerequisites[0].course_id, "a");
        assert!(b.direct_prerequisites[0].direct_prerequisites.is_empty());
        assert_eq!(chain.depth(), 2);
    }

    #[test]
    fn shared_prerequisite_is_repeated_under_each_parent() {
        let graph = PrerequisiteGraph::from_edges([
            ("top", "left"),
            ("top", "right"),
            ("left", "base"),
            ("right", "base"),
        ]);
        let chain = build_chain(&graph, &catalog(&["top", "left", "right", "base"]), "top").unwrap();

        let bases: Vec<&str> = chain
            .direct_prerequisites
            .iter()
            .flat_map(|child| child.direct_prerequisites.iter())
            .map(|node| node.course_id.as_str())
            .collect();
        assert_eq!(bases, vec!["base", "base"]);
    }

    #[test]
    fn missing_course_is_not_found() {
        let graph = PrerequisiteGraph::from_edges([("b", "a")]);
        let err = build_chain(&graph, &catalog(&["b"]), "b").unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { entity_type: EntityType::Course, ref id } if id == "a"
        ));
    }
}
