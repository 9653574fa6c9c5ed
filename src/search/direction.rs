use std::{fmt, hash::Hash};

use parking_lot::{Mutex, MutexGuard};

use super::frontier::Frontier;
use crate::{error::SearchError, graphs::Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Frontier of one search direction together with the mutex serializing all
/// access to it.
///
/// The peer direction only uses `Frontier::peek` while holding the lock, which
/// copies weight and completion flag out of the critical section.
pub struct DirectionState<V: Hash + Eq, E> {
    direction: Direction,
    frontier: Mutex<Frontier<V, E>>,
}

impl<V: Clone + Eq + Hash, E> DirectionState<V, E> {
    pub fn new(direction: Direction, seed: V) -> DirectionState<V, E> {
        DirectionState {
            direction,
            frontier: Mutex::new(Frontier::with_seed(seed)),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn lock(&self) -> MutexGuard<'_, Frontier<V, E>> {
        self.frontier.lock()
    }

    pub fn pop_minimal(&self) -> Option<(V, Weight)> {
        self.frontier.lock().pop_minimal()
    }

    /// Marks `vertex` done and pops the next vertex in one critical section.
    pub fn complete_and_pop(&self, vertex: &V) -> Result<Option<(V, Weight)>, SearchError> {
        let mut frontier = self.frontier.lock();
        frontier.mark_done(vertex)?;
        Ok(frontier.pop_minimal())
    }

    pub fn mark_done(&self, vertex: &V) -> Result<(), SearchError> {
        self.frontier.lock().mark_done(vertex)
    }

    pub fn search_space_size(&self) -> u32 {
        self.frontier.lock().search_space_size()
    }

    pub fn number_of_queued(&self) -> usize {
        self.frontier.lock().number_of_queued()
    }
}
