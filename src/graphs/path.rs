use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId, Weight};

/// Represents a request for finding a shortest path in a graph.
///
/// This struct is used to encapsulate the information required to find a path
/// from a source vertex to a target vertex in a graph.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortestPathRequest {
    source: VertexId,
    target: VertexId,
}

impl ShortestPathRequest {
    pub fn new(source: VertexId, target: VertexId) -> ShortestPathRequest {
        ShortestPathRequest { source, target }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }
}

/// Represents a path in a graph.
///
/// `vertices` runs from start to target, both included. `edges[i]` connects
/// `vertices[i]` and `vertices[i + 1]`. A missing path is represented by an
/// empty path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShortestPath<V = VertexId, E = EdgeId> {
    pub vertices: Vec<V>,
    pub edges: Vec<E>,
    pub weight: Weight,
}

impl<V, E> Default for ShortestPath<V, E> {
    fn default() -> Self {
        ShortestPath {
            vertices: Vec::new(),
            edges: Vec::new(),
            weight: 0.0,
        }
    }
}

impl<V, E> ShortestPath<V, E> {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.weight = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// weight of a shortest path, if there exists one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase {
    pub request: ShortestPathRequest,
    pub weight: Option<Weight>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult {
    pub test_case: ShortestPathTestCase,
    pub cooperative_seconds: f64,
    pub parallel_seconds: f64,
}
