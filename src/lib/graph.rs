//! Minimal graph collaborator contract.
//!
//! The pipeline and process frameworks never talk to a storage backend
//! directly. They consume element sequences through the [`Graph`] and
//! [`Edge`] traits defined here, which is the whole interface a backend
//! has to satisfy. [`AdjacencyGraph`] is a small append-only adjacency
//! list used to feed pipelines in tests and doctests; it is not a storage
//! engine.
//!
//! # Example
//!
//! ```
//! use graphpipes::graph::{AdjacencyGraph, Edge, Graph};
//!
//! let mut graph = AdjacencyGraph::new();
//! graph.add_edge("1", "knows", "2");
//! graph.add_edge("1", "knows", "3");
//!
//! let neighbors: Vec<String> =
//!     graph.out_edges(&"1".to_string()).map(|e| e.in_vertex()).collect();
//! assert_eq!(neighbors, vec!["2".to_string(), "3".to_string()]);
//! ```

use crate::pipes::pipe::Starts;

/// A directed, labeled edge between two vertices.
///
/// `out_vertex` is the tail (the vertex the edge leaves) and `in_vertex`
/// is the head (the vertex the edge arrives at), following the
/// property-graph convention.
pub trait Edge {
    /// The vertex representation used by the owning graph.
    type Vertex;

    /// The vertex this edge leaves (the tail).
    fn out_vertex(&self) -> Self::Vertex;

    /// The vertex this edge arrives at (the head).
    fn in_vertex(&self) -> Self::Vertex;

    /// The edge label.
    fn label(&self) -> &str;
}

/// The sequence-producing contract a storage backend supplies.
///
/// Every method hands back an owned, sendable iterator so the result can
/// be bound directly as a pipe's starts or drained into a channel by a
/// source thread.
pub trait Graph {
    /// The vertex representation.
    type Vertex: Clone + Send + 'static;
    /// The edge representation.
    type Edge: Edge<Vertex = Self::Vertex> + Clone + Send + 'static;

    /// Whole-graph vertex scan.
    fn vertices(&self) -> Starts<Self::Vertex>;

    /// Whole-graph edge scan.
    fn edges(&self) -> Starts<Self::Edge>;

    /// Edges leaving `vertex`.
    fn out_edges(&self, vertex: &Self::Vertex) -> Starts<Self::Edge>;

    /// Edges arriving at `vertex`.
    fn in_edges(&self, vertex: &Self::Vertex) -> Starts<Self::Edge>;
}

/// A directed labeled edge between string-identified vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEdge {
    out_id: String,
    in_id: String,
    label: String,
}

impl LabeledEdge {
    /// Create an edge from `out_id` to `in_id` with the given label.
    #[must_use]
    pub fn new(out_id: impl Into<String>, label: impl Into<String>, in_id: impl Into<String>) -> Self {
        Self { out_id: out_id.into(), in_id: in_id.into(), label: label.into() }
    }
}

impl Edge for LabeledEdge {
    type Vertex = String;

    fn out_vertex(&self) -> String {
        self.out_id.clone()
    }

    fn in_vertex(&self) -> String {
        self.in_id.clone()
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Append-only adjacency-list graph with string vertex ids.
///
/// Vertices are created implicitly by `add_edge`; isolated vertices can be
/// added with `add_vertex`. Edge order is insertion order, which makes
/// scan output deterministic for tests.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    vertices: Vec<String>,
    edges: Vec<LabeledEdge>,
}

impl AdjacencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex if not already present.
    pub fn add_vertex(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.vertices.contains(&id) {
            self.vertices.push(id);
        }
    }

    /// Add a labeled edge, implicitly adding its endpoints.
    pub fn add_edge(
        &mut self,
        out_id: impl Into<String>,
        label: impl Into<String>,
        in_id: impl Into<String>,
    ) {
        let edge = LabeledEdge::new(out_id.into(), label.into(), in_id.into());
        self.add_vertex(edge.out_id.clone());
        self.add_vertex(edge.in_id.clone());
        self.edges.push(edge);
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Graph for AdjacencyGraph {
    type Vertex = String;
    type Edge = LabeledEdge;

    fn vertices(&self) -> Starts<String> {
        Box::new(self.vertices.clone().into_iter())
    }

    fn edges(&self) -> Starts<LabeledEdge> {
        Box::new(self.edges.clone().into_iter())
    }

    fn out_edges(&self, vertex: &String) -> Starts<LabeledEdge> {
        let vertex = vertex.clone();
        let edges: Vec<LabeledEdge> =
            self.edges.iter().filter(|e| e.out_id == vertex).cloned().collect();
        Box::new(edges.into_iter())
    }

    fn in_edges(&self, vertex: &String) -> Starts<LabeledEdge> {
        let vertex = vertex.clone();
        let edges: Vec<LabeledEdge> =
            self.edges.iter().filter(|e| e.in_id == vertex).cloned().collect();
        Box::new(edges.into_iter())
    }
}
