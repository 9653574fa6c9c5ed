use crate::graphs::Weight;

/// Search record of a single vertex in one search direction.
///
/// Seed steps have neither predecessor nor edge. Steps handed out by an
/// expander carry the weight of their edge only; the frontier turns it into a
/// cumulative weight when the step is relaxed.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<V, E> {
    pub vertex: V,
    pub predecessor: Option<V>,
    pub edge: Option<E>,
    pub weight: Weight,
    pub done: bool,
}

impl<V, E> Step<V, E> {
    pub fn seed(vertex: V) -> Step<V, E> {
        Step {
            vertex,
            predecessor: None,
            edge: None,
            weight: 0.0,
            done: false,
        }
    }

    /// Candidate step reaching `vertex` from `predecessor` over `edge`.
    pub fn candidate(vertex: V, predecessor: V, edge: E, edge_weight: Weight) -> Step<V, E> {
        Step {
            vertex,
            predecessor: Some(predecessor),
            edge: Some(edge),
            weight: edge_weight,
            done: false,
        }
    }
}
