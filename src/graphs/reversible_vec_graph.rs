use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    edge::{DirectedHeadlessWeightedEdge, DirectedTaillessWeightedEdge, DirectedWeightedEdge},
    EdgeId, VertexId, Weight,
};
use crate::{
    error::SearchError,
    search::{direction::Direction, expander::Expander, step::Step},
};

/// Adjacency list graph that keeps both out and in edges, so it can be
/// searched forward from a source and backward from a target.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ReversibleVecGraph {
    out_edges: Vec<Vec<DirectedTaillessWeightedEdge>>,
    in_edges: Vec<Vec<DirectedHeadlessWeightedEdge>>,
    next_edge_id: EdgeId,
}

impl ReversibleVecGraph {
    pub fn new() -> ReversibleVecGraph {
        ReversibleVecGraph::default()
    }

    /// Builds a graph from edges. Edge ids are taken from the edges.
    pub fn from_edges(edges: &[DirectedWeightedEdge]) -> ReversibleVecGraph {
        let mut graph = ReversibleVecGraph::new();
        edges.iter().for_each(|edge| graph.insert_edge(edge));
        graph
    }

    /// Adds an edge and returns its id. Parallel edges are kept.
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId, weight: Weight) -> EdgeId {
        let id = self.next_edge_id;
        self.insert_edge(&DirectedWeightedEdge::new(id, tail, head, weight));
        id
    }

    fn insert_edge(&mut self, edge: &DirectedWeightedEdge) {
        // Ensure the edge endpoints is within the bounds of the adjacency lists.
        let max_edge_endpoint = std::cmp::max(edge.tail(), edge.head()) as usize;
        if max_edge_endpoint >= self.out_edges.len() {
            self.out_edges.resize(max_edge_endpoint + 1, Vec::new());
            self.in_edges.resize(max_edge_endpoint + 1, Vec::new());
        }

        self.out_edges[edge.tail() as usize].push(edge.tailless());
        self.in_edges[edge.head() as usize].push(edge.headless());
        self.next_edge_id = self.next_edge_id.max(edge.id().saturating_add(1));
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.out_edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    pub fn out_edges(
        &self,
        tail: VertexId,
    ) -> impl ExactSizeIterator<Item = DirectedWeightedEdge> + '_ {
        let edges = match self.out_edges.get(tail as usize) {
            Some(edges) => edges.as_slice(),
            None => &[],
        };
        edges.iter().map(move |edge| edge.set_tail(tail))
    }

    pub fn in_edges(
        &self,
        head: VertexId,
    ) -> impl ExactSizeIterator<Item = DirectedWeightedEdge> + '_ {
        let edges = match self.in_edges.get(head as usize) {
            Some(edges) => edges.as_slice(),
            None => &[],
        };
        edges.iter().map(move |edge| edge.set_head(head))
    }

    /// Out edge of `tail` with the given id, if any.
    pub fn get_edge(&self, tail: VertexId, id: EdgeId) -> Option<DirectedWeightedEdge> {
        self.out_edges(tail).find(|edge| edge.id() == id)
    }

    pub fn forward_expander(self: &Arc<Self>) -> GraphExpander {
        GraphExpander {
            graph: Arc::clone(self),
            direction: Direction::Forward,
        }
    }

    pub fn backward_expander(self: &Arc<Self>) -> GraphExpander {
        GraphExpander {
            graph: Arc::clone(self),
            direction: Direction::Backward,
        }
    }
}

/// Expands vertices of a `ReversibleVecGraph` along out edges (forward) or
/// in edges (backward).
#[derive(Clone)]
pub struct GraphExpander {
    graph: Arc<ReversibleVecGraph>,
    direction: Direction,
}

impl Expander<VertexId, EdgeId> for GraphExpander {
    fn expand(
        &self,
        vertex: &VertexId,
        neighbors: &mut Vec<Step<VertexId, EdgeId>>,
    ) -> Result<(), SearchError> {
        match self.direction {
            Direction::Forward => {
                let edges = self.graph.out_edges(*vertex);
                neighbors.try_reserve(edges.len())?;
                neighbors.extend(edges.map(|edge| {
                    Step::candidate(edge.head(), edge.tail(), edge.id(), edge.weight())
                }));
            }
            Direction::Backward => {
                let edges = self.graph.in_edges(*vertex);
                neighbors.try_reserve(edges.len())?;
                neighbors.extend(edges.map(|edge| {
                    Step::candidate(edge.tail(), edge.head(), edge.id(), edge.weight())
                }));
            }
        }

        Ok(())
    }
}
