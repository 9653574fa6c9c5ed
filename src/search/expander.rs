use super::step::Step;
use crate::error::SearchError;

/// Produces the neighbors of a vertex in one search direction.
///
/// Every candidate has `predecessor == vertex`, carries the connecting edge
/// and the weight of that single edge. Forward and backward expanders are
/// called concurrently by the parallel search and must not share mutable
/// state.
pub trait Expander<V, E>: Send + Sync {
    fn expand(&self, vertex: &V, neighbors: &mut Vec<Step<V, E>>) -> Result<(), SearchError>;
}

impl<V, E, F> Expander<V, E> for F
where
    F: Fn(&V, &mut Vec<Step<V, E>>) -> Result<(), SearchError> + Send + Sync,
{
    fn expand(&self, vertex: &V, neighbors: &mut Vec<Step<V, E>>) -> Result<(), SearchError> {
        self(vertex, neighbors)
    }
}
