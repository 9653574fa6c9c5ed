use std::{hash::Hash, sync::Arc};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    answer::SharedAnswer,
    direction::{Direction, DirectionState},
    expander::Expander,
    parallel_searcher::ParallelSearcher,
    searcher::Searcher,
};
use crate::{
    error::SearchError,
    graphs::{path::ShortestPath, Weight},
};

/// Progress of the latest search of a `PathFinder`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Idle,
    Seeding,
    Searching,
    Found,
    NotFound,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFinderConfig {
    /// If false only the forward direction expands, the target is merely
    /// probed.
    pub bidirectional: bool,
    /// Number of lockstep iterations of a cooperative search between two
    /// calls of the cancellation callback.
    pub cancel_check_interval: u32,
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        PathFinderConfig {
            bidirectional: true,
            cancel_check_interval: 10,
        }
    }
}

/// Size of both search spaces after the latest search.
///
/// `*_settled` counts completed vertices, `*_queued` the vertices that were
/// reached but never popped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    pub forward_settled: u32,
    pub backward_settled: u32,
    pub forward_queued: usize,
    pub backward_queued: usize,
}

/// Weighted shortest path search between two vertices, run as a bidirectional
/// Dijkstra either cooperatively on the calling thread or with one thread per
/// direction.
pub struct PathFinder<V, E> {
    forward_expander: Arc<dyn Expander<V, E>>,
    backward_expander: Arc<dyn Expander<V, E>>,
    config: PathFinderConfig,
    answer: Arc<SharedAnswer<V>>,
    state: SearchState,
    statistics: SearchStatistics,
}

impl<V, E> PathFinder<V, E>
where
    V: Clone + Eq + Hash + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new<F, B>(forward_expander: F, backward_expander: B, bidirectional: bool) -> Self
    where
        F: Expander<V, E> + 'static,
        B: Expander<V, E> + 'static,
    {
        let config = PathFinderConfig {
            bidirectional,
            ..PathFinderConfig::default()
        };
        Self::with_config(Arc::new(forward_expander), Arc::new(backward_expander), config)
    }

    pub fn with_config(
        forward_expander: Arc<dyn Expander<V, E>>,
        backward_expander: Arc<dyn Expander<V, E>>,
        config: PathFinderConfig,
    ) -> Self {
        PathFinder {
            forward_expander,
            backward_expander,
            config,
            answer: Arc::new(SharedAnswer::default()),
            state: SearchState::Idle,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn config(&self) -> &PathFinderConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Cooperative search on the calling thread.
    ///
    /// `result` is cleared first and filled if a path exists. `cancel` is
    /// called every `cancel_check_interval` lockstep iterations, an error
    /// returned by it aborts the search.
    pub fn shortest_path_into(
        &mut self,
        start: &V,
        target: &V,
        result: &mut ShortestPath<V, E>,
        cancel: &dyn Fn() -> Result<(), SearchError>,
    ) -> Result<bool, SearchError> {
        result.clear();
        let (forward, backward) = self.seed(start, target);

        self.state = SearchState::Searching;
        let outcome = self.search_cooperative(&forward, &backward, cancel);

        self.finish(outcome, &forward, &backward, result)
    }

    pub fn shortest_path(
        &mut self,
        start: &V,
        target: &V,
        cancel: &dyn Fn() -> Result<(), SearchError>,
    ) -> Result<Option<ShortestPath<V, E>>, SearchError> {
        let mut path = ShortestPath::default();
        let found = self.shortest_path_into(start, target, &mut path, cancel)?;
        Ok(found.then_some(path))
    }

    pub fn shortest_path_weight(
        &mut self,
        start: &V,
        target: &V,
    ) -> Result<Option<Weight>, SearchError> {
        let path = self.shortest_path(start, target, &|| Ok(()))?;
        Ok(path.map(|path| path.weight))
    }

    /// Search with one thread per direction.
    ///
    /// Cannot be cancelled, both threads run until bingo, exhaustion or
    /// failure. A failure of the forward thread is reported in preference to
    /// one of the backward thread.
    pub fn shortest_path_parallel_into(
        &mut self,
        start: &V,
        target: &V,
        result: &mut ShortestPath<V, E>,
    ) -> Result<bool, SearchError> {
        result.clear();
        let (forward, backward) = self.seed(start, target);
        let forward = Arc::new(forward);
        let backward = Arc::new(backward);

        self.state = SearchState::Searching;
        let outcome = self.search_parallel(&forward, &backward);

        self.finish(outcome, &forward, &backward, result)
    }

    pub fn shortest_path_parallel(
        &mut self,
        start: &V,
        target: &V,
    ) -> Result<Option<ShortestPath<V, E>>, SearchError> {
        let mut path = ShortestPath::default();
        let found = self.shortest_path_parallel_into(start, target, &mut path)?;
        Ok(found.then_some(path))
    }

    fn seed(&mut self, start: &V, target: &V) -> (DirectionState<V, E>, DirectionState<V, E>) {
        self.state = SearchState::Seeding;
        self.statistics = SearchStatistics::default();
        self.answer.reset();

        (
            DirectionState::new(Direction::Forward, start.clone()),
            DirectionState::new(Direction::Backward, target.clone()),
        )
    }

    fn search_cooperative(
        &self,
        forward: &DirectionState<V, E>,
        backward: &DirectionState<V, E>,
        cancel: &dyn Fn() -> Result<(), SearchError>,
    ) -> Result<(), SearchError> {
        let mut forward_searcher =
            Searcher::new(forward, backward, &self.answer, &*self.forward_expander);
        let mut backward_searcher = self.config.bidirectional.then(|| {
            Searcher::new(backward, forward, &self.answer, &*self.backward_expander)
        });

        let cancel_check_interval = self.config.cancel_check_interval.max(1);
        let mut counter = 0;
        while !self.answer.bingo() {
            if !forward_searcher.step()? {
                break;
            }
            if let Some(backward_searcher) = backward_searcher.as_mut() {
                if !backward_searcher.step()? {
                    break;
                }
            }

            counter += 1;
            if counter == cancel_check_interval {
                cancel()?;
                counter = 0;
            }
        }

        Ok(())
    }

    fn search_parallel(
        &self,
        forward: &Arc<DirectionState<V, E>>,
        backward: &Arc<DirectionState<V, E>>,
    ) -> Result<(), SearchError> {
        let mut forward_searcher = ParallelSearcher::new(
            Arc::clone(forward),
            Arc::clone(backward),
            Arc::clone(&self.answer),
            Arc::clone(&self.forward_expander),
        );
        let mut backward_searcher = self.config.bidirectional.then(|| {
            ParallelSearcher::new(
                Arc::clone(backward),
                Arc::clone(forward),
                Arc::clone(&self.answer),
                Arc::clone(&self.backward_expander),
            )
        });

        forward_searcher.start()?;
        if let Some(backward_searcher) = backward_searcher.as_mut() {
            if let Err(error) = backward_searcher.start() {
                self.answer.declare_bingo();
                return forward_first(forward_searcher.join(), Err(error));
            }
        }

        let forward_result = forward_searcher.join();
        let backward_result = backward_searcher
            .as_mut()
            .map_or(Ok(()), |backward_searcher| backward_searcher.join());

        forward_first(forward_result, backward_result)
    }

    fn finish(
        &mut self,
        outcome: Result<(), SearchError>,
        forward: &DirectionState<V, E>,
        backward: &DirectionState<V, E>,
        result: &mut ShortestPath<V, E>,
    ) -> Result<bool, SearchError> {
        self.statistics = SearchStatistics {
            forward_settled: forward.search_space_size(),
            backward_settled: backward.search_space_size(),
            forward_queued: forward.number_of_queued(),
            backward_queued: backward.number_of_queued(),
        };

        if let Err(error) = outcome {
            debug!("search failed: {}", error);
            self.state = SearchState::Failed;
            return Err(error);
        }

        let best = self.answer.snapshot();
        let intermediate = match best.intermediate() {
            Some(intermediate) if self.answer.bingo() => intermediate,
            _ => {
                debug!("no path found, statistics {:?}", self.statistics);
                self.state = SearchState::NotFound;
                return Ok(false);
            }
        };

        if let Err(error) = reconstruct_path(intermediate, forward, backward, result) {
            result.clear();
            self.state = SearchState::Failed;
            return Err(error);
        }

        debug!(
            "found path of weight {} (highscore {:?}) with {} edges, statistics {:?}",
            result.weight,
            best.highscore(),
            result.edges.len(),
            self.statistics
        );
        self.state = SearchState::Found;
        Ok(true)
    }
}

/// Outcome of both directions, a forward failure wins over a backward one.
fn forward_first(
    forward_result: Result<(), SearchError>,
    backward_result: Result<(), SearchError>,
) -> Result<(), SearchError> {
    forward_result.and(backward_result)
}

/// Joins the two predecessor chains meeting at `intermediate`.
///
/// The forward chain is walked back to the start and reversed, the backward
/// chain is walked on to the target.
fn reconstruct_path<V, E>(
    intermediate: &V,
    forward: &DirectionState<V, E>,
    backward: &DirectionState<V, E>,
    result: &mut ShortestPath<V, E>,
) -> Result<(), SearchError>
where
    V: Clone + Eq + Hash,
    E: Clone,
{
    let broken_chain = || SearchError::Internal("predecessor chain is broken".to_string());

    let forward_frontier = forward.lock();
    let mut step = forward_frontier.find(intermediate).ok_or_else(broken_chain)?;
    let forward_weight = step.weight;
    while let Some(predecessor) = &step.predecessor {
        result.edges.extend(step.edge.clone());
        result.vertices.push(predecessor.clone());
        step = forward_frontier.find(predecessor).ok_or_else(broken_chain)?;
    }
    result.vertices.reverse();
    result.edges.reverse();
    result.vertices.push(intermediate.clone());

    let backward_frontier = backward.lock();
    let mut step = backward_frontier.find(intermediate).ok_or_else(broken_chain)?;
    let backward_weight = step.weight;
    while let Some(predecessor) = &step.predecessor {
        result.edges.extend(step.edge.clone());
        result.vertices.push(predecessor.clone());
        step = backward_frontier.find(predecessor).ok_or_else(broken_chain)?;
    }

    result.weight = forward_weight + backward_weight;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::forward_first;
    use crate::error::SearchError;

    #[test]
    fn forward_failure_wins() {
        let spawn_failure =
            || -> Result<(), SearchError> { Err(SearchError::Internal("cannot spawn".to_string())) };

        assert_eq!(
            forward_first(Err(SearchError::OutOfMemory), spawn_failure()),
            Err(SearchError::OutOfMemory)
        );
        assert_eq!(forward_first(Ok(()), spawn_failure()), spawn_failure());
        assert_eq!(forward_first(Ok(()), Ok(())), Ok(()));
    }
}
