pub mod edge;
pub mod graph_factory;
pub mod graph_functions;
pub mod path;
pub mod reversible_vec_graph;

pub type VertexId = u32;
pub type EdgeId = u32;
pub type Weight = f64;

/// Returns true if `weight` may be used as an edge weight or path distance.
pub fn is_valid_weight(weight: Weight) -> bool {
    weight.is_finite() && weight >= 0.0
}
