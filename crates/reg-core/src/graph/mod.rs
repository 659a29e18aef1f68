//! Prerequisite graph engine.
//!
//! Edges point from a dependent course to its requirement
//! (`course_id → prerequisite_id`). The edge set is kept acyclic by
//! construction: every accepted edge first passes [`would_create_cycle`].
//!
//! Traversals here are pure and infallible. Existence of the starting
//! course is the caller's concern.

mod chain;
mod closure;
mod cycle;

use std::collections::HashMap;

pub use chain::build_chain;
pub use closure::all_prerequisites;
pub use cycle::would_create_cycle;

/// Read access to direct prerequisite edges.
pub trait GraphAccessor {
    /// Direct prerequisites of `course_id`, in insertion order.
    fn edges_from(&self, course_id: &str) -> &[String];

    fn edge_exists(&self, course_id: &str, prerequisite_id: &str) -> bool {
        self.edges_from(course_id)
            .iter()
            .any(|id| id == prerequisite_id)
    }
}

/// In-memory adjacency snapshot of the prerequisite edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteGraph {
    edges: HashMap<String, Vec<String>>,
}

impl PrerequisiteGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(course_id, prerequisite_id)` pairs. Duplicate pairs collapse.
    pub fn from_edges<I, C, P>(edges: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<String>,
        P: Into<String>,
    {
        let mut graph = Self::new();
        for (course_id, prerequisite_id) in edges {
            graph.add_edge(course_id, prerequisite_id);
        }
        graph
    }

    /// Add an edge. Returns `false` if the pair was already present.
    ///
    /// No cycle check happens here.
    pub fn add_edge(&mut self, course_id: impl Into<String>, prerequisite_id: impl Into<String>) -> bool {
        let prerequisite_id = prerequisite_id.into();
        let targets = self.edges.entry(course_id.into()).or_default();
        if targets.contains(&prerequisite_id) {
            return false;
        }
        targets.push(prerequisite_id);
        true
    }

    /// Remove an edge. Returns `false` if it did not exist.
    pub fn remove_edge(&mut self, course_id: &str, prerequisite_id: &str) -> bool {
        let Some(targets) = self.edges.get_mut(course_id) else {
            return false;
        };
        let before = targets.len();
        targets.retain(|id| id != prerequisite_id);
        let removed = targets.len() != before;
        if targets.is_empty() {
            self.edges.remove(course_id);
        }
        removed
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl GraphAccessor for PrerequisiteGraph {
    fn edges_from(&self, course_id: &str) -> &[String] {
        self.edges
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_rejects_duplicates() {
        let mut graph = PrerequisiteGraph::new();
        assert!(graph.add_edge("b", "a"));
        assert!(!graph.add_edge("b", "a"));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edge_exists("b", "a"));
        assert!(!graph.edge_exists("a", "b"));
    }

    #[test]
    fn edges_keep_insertion_order() {
        let graph = PrerequisiteGraph::from_edges([("d", "c"), ("d", "a"), ("d", "b")]);
        assert_eq!(graph.edges_from("d"), ["c", "a", "b"]);
        assert!(graph.edges_from("unknown").is_empty());
    }

    #[test]
    fn remove_edge_reports_absence() {
        let mut graph = PrerequisiteGraph::from_edges([("b", "a")]);
        assert!(!graph.remove_edge("b", "x"));
        assert!(graph.remove_edge("b", "a"));
        assert!(!graph.remove_edge("b", "a"));
        assert!(graph.is_empty());
    }
}
