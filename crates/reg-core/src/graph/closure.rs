use std::collections::HashSet;

use super::GraphAccessor;

/// Every course reachable from `course_id` through one or more edges.
///
/// Each course appears once, in pre-order discovery order. A course with no
/// prerequisites yields an empty vector.
pub fn all_prerequisites<'g, G>(graph: &'g G, course_id: &'g str) -> Vec<String>
where
    G: GraphAccessor + ?Sized,
{
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    visit(graph, course_id, &mut visited, &mut order);
    order.into_iter().map(str::to_owned).collect()
}

fn visit<'g, G>(graph: &'g G, current: &'g str, visited: &mut HashSet<&'g str>, order: &mut Vec<&'g str>)
where
    G: GraphAccessor + ?Sized,
{
    if !visited.insert(current) {
        return;
    }
    for next in graph.edges_from(current) {
        if !visited.contains(next.as_str()) {
            order.push(next);
            visit(graph, next, visited, order);
        }
    }
}
