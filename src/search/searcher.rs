use std::hash::Hash;

use log::trace;

use super::{answer::SharedAnswer, direction::DirectionState, expander::Expander, step::Step};
use crate::{error::SearchError, graphs::Weight};

/// Expands `vertex`, relaxes its neighbors into `own` and probes `peer` for a
/// meeting point.
///
/// `vertex` was just popped from `own` with cumulative `weight`. The caller
/// marks it done afterwards; completing it before the probe would break the
/// meeting point argument.
pub(crate) fn settle<V, E>(
    own: &DirectionState<V, E>,
    peer: &DirectionState<V, E>,
    answer: &SharedAnswer<V>,
    expander: &dyn Expander<V, E>,
    neighbors: &mut Vec<Step<V, E>>,
    vertex: &V,
    weight: Weight,
) -> Result<(), SearchError>
where
    V: Clone + Eq + Hash,
{
    neighbors.clear();
    expander.expand(vertex, neighbors)?;
    relax_neighbors(own, neighbors, weight)?;
    probe_peer(own, peer, answer, vertex, weight);
    Ok(())
}

fn relax_neighbors<V, E>(
    own: &DirectionState<V, E>,
    neighbors: &mut Vec<Step<V, E>>,
    weight: Weight,
) -> Result<(), SearchError>
where
    V: Clone + Eq + Hash,
{
    let mut frontier = own.lock();
    frontier.try_reserve(neighbors.len())?;
    for neighbor in neighbors.drain(..) {
        let tentative_weight = weight + neighbor.weight;
        frontier.relax(neighbor, tentative_weight)?;
    }
    Ok(())
}

/// Lock order is peer direction first, shared answer second. The own
/// direction is never locked here, so two probing threads cannot deadlock.
fn probe_peer<V, E>(
    own: &DirectionState<V, E>,
    peer: &DirectionState<V, E>,
    answer: &SharedAnswer<V>,
    vertex: &V,
    weight: Weight,
) where
    V: Clone + Eq + Hash,
{
    let peer_frontier = peer.lock();
    let Some(peer_entry) = peer_frontier.peek(vertex) else {
        return;
    };

    let mut best = answer.lock();
    if best.record_meeting(vertex, weight, peer_entry) {
        trace!(
            "{} search declared bingo at total weight {}",
            own.direction(),
            weight + peer_entry.weight
        );
        answer.declare_bingo();
    }
}

/// Caller driven search in one direction.
///
/// Both directions of a cooperative search are stepped from the same thread,
/// so every lock taken here is uncontended.
pub struct Searcher<'a, V: Hash + Eq, E> {
    own: &'a DirectionState<V, E>,
    peer: &'a DirectionState<V, E>,
    answer: &'a SharedAnswer<V>,
    expander: &'a dyn Expander<V, E>,
    neighbors: Vec<Step<V, E>>,
}

impl<'a, V, E> Searcher<'a, V, E>
where
    V: Clone + Eq + Hash,
{
    pub fn new(
        own: &'a DirectionState<V, E>,
        peer: &'a DirectionState<V, E>,
        answer: &'a SharedAnswer<V>,
        expander: &'a dyn Expander<V, E>,
    ) -> Searcher<'a, V, E> {
        Searcher {
            own,
            peer,
            answer,
            expander,
            neighbors: Vec::new(),
        }
    }

    /// Settles the next minimal vertex of this direction.
    ///
    /// Returns false, and declares bingo, if bingo was already declared or
    /// the frontier is exhausted.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        let next = self.own.pop_minimal();

        let Some((vertex, weight)) = next.filter(|_| !self.answer.bingo()) else {
            // Either the peer found the answer or this direction ran out of
            // vertices, in which case there is no path.
            self.answer.declare_bingo();
            return Ok(false);
        };

        settle(
            self.own,
            self.peer,
            self.answer,
            self.expander,
            &mut self.neighbors,
            &vertex,
            weight,
        )?;
        self.own.mark_done(&vertex)?;

        Ok(true)
    }
}
