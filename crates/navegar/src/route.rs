//! Routable directed graph and the shortest-path search primitive.
//!
//! The compiled scene graph is mirrored into a petgraph `DiGraph` whose
//! vertices carry scene names. Path search is an injected capability behind
//! [`PathSearch`], so any unweighted shortest-path algorithm can be swapped
//! in; the default is a unit-cost search, which on a directed unweighted
//! graph is equivalent to breadth-first search.

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Mutable adjacency structure the navigator routes over.
///
/// Vertices are added once per scene at compile time and never removed; arcs
/// are added per declared edge, and added/removed dynamically as back edges
/// are grafted and consumed during traversal.
#[derive(Debug, Default)]
pub struct RouteGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl RouteGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex for `name`, or return the existing one
    pub fn add_vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(ix) = self.indices.get(name) {
            return *ix;
        }
        let ix = self.graph.add_node(name.to_string());
        let _ = self.indices.insert(name.to_string(), ix);
        ix
    }

    /// Look up the vertex for a scene name
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.indices.get(name).copied()
    }

    /// Scene name at a vertex
    #[must_use]
    pub fn name_at(&self, index: NodeIndex) -> Option<&str> {
        self.graph.node_weight(index).map(String::as_str)
    }

    /// Add a directed arc between two existing vertices.
    ///
    /// Returns false if either endpoint is missing.
    pub fn add_arc(&mut self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => {
                let _ = self.graph.add_edge(a, b, ());
                true
            }
            _ => false,
        }
    }

    /// Remove one directed arc between two vertices, if present
    pub fn remove_arc(&mut self, from: &str, to: &str) -> bool {
        let (Some(a), Some(b)) = (self.index_of(from), self.index_of(to)) else {
            return false;
        };
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                let _ = self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Whether a directed arc exists
    #[must_use]
    pub fn has_arc(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of arcs
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The underlying petgraph structure, for custom [`PathSearch`]
    /// implementations
    #[must_use]
    pub fn petgraph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}

/// Shortest-path search over a [`RouteGraph`].
///
/// Returns the full vertex sequence from `from` to `to` inclusive, or `None`
/// when no directed path exists. Which path is returned when several shortest
/// paths tie is implementation-defined; callers must only rely on length.
pub trait PathSearch {
    /// Find a shortest directed path as a sequence of scene names
    fn find_path(&self, graph: &RouteGraph, from: &str, to: &str) -> Option<Vec<String>>;
}

/// Default search: unit edge cost, zero heuristic.
///
/// Equivalent to breadth-first search on an unweighted directed graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCostSearch;

impl PathSearch for UnitCostSearch {
    fn find_path(&self, graph: &RouteGraph, from: &str, to: &str) -> Option<Vec<String>> {
        let start = graph.index_of(from)?;
        let goal = graph.index_of(to)?;
        let (_, path) = astar(graph.petgraph(), start, |ix| ix == goal, |_| 1u32, |_| 0u32)?;
        path.into_iter()
            .map(|ix| graph.name_at(ix).map(ToString::to_string))
            .collect()
    }
}
