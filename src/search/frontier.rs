use std::{
    cmp::{Ordering, Reverse},
    hash::Hash,
};

use ahash::{HashMap, HashMapExt};
use keyed_priority_queue::KeyedPriorityQueue;

use super::step::Step;
use crate::{
    error::SearchError,
    graphs::{is_valid_weight, Weight},
};

/// Weight ordered by `total_cmp`, so it can key the priority queue.
#[derive(Clone, Copy, Debug, PartialEq)]
struct QueueWeight(Weight);

impl Eq for QueueWeight {}

impl Ord for QueueWeight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for QueueWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What the other search direction may learn about a vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeerEntry {
    pub weight: Weight,
    pub done: bool,
}

/// Dijkstra frontier of one search direction.
///
/// Every step ever accepted stays in `steps`, also after it was popped, so
/// predecessor chains can be walked and the peer direction can probe it. The
/// keyed queue only holds the steps that were not popped yet and supports
/// decrease-key.
pub struct Frontier<V: Hash + Eq, E> {
    queue: KeyedPriorityQueue<V, Reverse<QueueWeight>>,
    steps: HashMap<V, Step<V, E>>,
    number_of_done: u32,
}

impl<V: Clone + Eq + Hash, E> Default for Frontier<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash, E> Frontier<V, E> {
    pub fn new() -> Frontier<V, E> {
        Frontier {
            queue: KeyedPriorityQueue::new(),
            steps: HashMap::new(),
            number_of_done: 0,
        }
    }

    pub fn with_seed(vertex: V) -> Frontier<V, E> {
        let mut frontier = Frontier::new();
        let seed = Step::seed(vertex.clone());
        frontier.queue.push(vertex.clone(), Reverse(QueueWeight(seed.weight)));
        frontier.steps.insert(vertex, seed);
        frontier
    }

    /// Looks up a vertex, regardless of whether it was popped already.
    pub fn find(&self, vertex: &V) -> Option<&Step<V, E>> {
        self.steps.get(vertex)
    }

    pub fn peek(&self, vertex: &V) -> Option<PeerEntry> {
        self.steps.get(vertex).map(|step| PeerEntry {
            weight: step.weight,
            done: step.done,
        })
    }

    /// Inserts a step for a vertex that is not part of the frontier yet.
    pub fn insert(&mut self, step: Step<V, E>) -> Result<(), SearchError> {
        if self.steps.contains_key(&step.vertex) {
            return Err(SearchError::Internal(
                "vertex inserted twice into frontier".to_string(),
            ));
        }

        self.queue
            .push(step.vertex.clone(), Reverse(QueueWeight(step.weight)));
        self.steps.insert(step.vertex.clone(), step);
        Ok(())
    }

    /// Decrease-key for a vertex that is present and not done yet.
    pub fn lower_weight(&mut self, vertex: &V, weight: Weight) -> Result<(), SearchError> {
        let step = self.steps.get_mut(vertex).ok_or_else(|| {
            SearchError::Internal("lowered weight of unknown vertex".to_string())
        })?;
        if step.done {
            return Err(SearchError::Internal(
                "lowered weight of a done vertex".to_string(),
            ));
        }

        step.weight = weight;
        self.queue.push(vertex.clone(), Reverse(QueueWeight(weight)));
        Ok(())
    }

    /// Offers `candidate` with the cumulative weight `weight`.
    ///
    /// Returns whether the candidate was accepted. A rejected candidate is
    /// dropped.
    pub fn relax(&mut self, mut candidate: Step<V, E>, weight: Weight) -> Result<bool, SearchError> {
        if !is_valid_weight(candidate.weight) {
            return Err(SearchError::InvalidWeight {
                weight: candidate.weight,
            });
        }
        if !is_valid_weight(weight) {
            return Err(SearchError::InvalidWeight { weight });
        }

        let Some(existing) = self.steps.get_mut(&candidate.vertex) else {
            candidate.weight = weight;
            self.insert(candidate)?;
            return Ok(true);
        };

        if existing.done || weight >= existing.weight {
            return Ok(false);
        }
        existing.predecessor = candidate.predecessor;
        existing.edge = candidate.edge;
        self.lower_weight(&candidate.vertex, weight)?;

        Ok(true)
    }

    /// Removes the not yet popped vertex with minimal weight from the queue.
    ///
    /// The vertex stays reachable through `find`.
    pub fn pop_minimal(&mut self) -> Option<(V, Weight)> {
        let (vertex, Reverse(QueueWeight(weight))) = self.queue.pop()?;
        Some((vertex, weight))
    }

    pub fn mark_done(&mut self, vertex: &V) -> Result<(), SearchError> {
        let step = self.steps.get_mut(vertex).ok_or_else(|| {
            SearchError::Internal("completed unknown vertex".to_string())
        })?;
        if !step.done {
            step.done = true;
            self.number_of_done += 1;
        }
        Ok(())
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), SearchError> {
        self.steps.try_reserve(additional)?;
        Ok(())
    }

    /// Number of vertices completed so far.
    pub fn search_space_size(&self) -> u32 {
        self.number_of_done
    }

    pub fn number_of_queued(&self) -> usize {
        self.queue.len()
    }
}
