use std::collections::HashSet;

use super::GraphAccessor;

/// Whether adding `course_id → candidate_prerequisite_id` would close a cycle.
///
/// True iff `course_id` is reachable from the candidate by following
/// existing edges forward. Runs in O(V + E) on an acyclic graph.
pub fn would_create_cycle<'g, G>(
    graph: &'g G,
    course_id: &str,
    candidate_prerequisite_id: &'g str,
) -> bool
where
    G: GraphAccessor + ?Sized,
{
    let mut visited = HashSet::new();
    reaches(graph, candidate_prerequisite_id, course_id, &mut visited)
}

fn reaches<'g, G>(graph: &'g G, current: &'g str, target: &str, visited: &mut HashSet<&'g str>) -> bool
where
    G: GraphAccessor + ?Sized,
{
    if current == target {
        return true;
    }
    if !visited.insert(current) {
        return false;
    }
    graph
        .edges_from(current)
        .iter()
        .any(|next| reaches(graph, next, target, visited))
}
