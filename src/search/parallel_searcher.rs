use std::{
    any::Any,
    hash::Hash,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread::{self, JoinHandle},
};

use log::{debug, warn};

use super::{
    answer::SharedAnswer, direction::DirectionState, expander::Expander, searcher::settle,
};
use crate::error::SearchError;

/// Search in one direction running autonomously on its own thread.
///
/// The thread runs until bingo is declared or its frontier is exhausted. Any
/// failure, including a panicking expander, is caught on the thread and
/// handed back by `join`.
pub struct ParallelSearcher<V: Hash + Eq, E> {
    own: Arc<DirectionState<V, E>>,
    peer: Arc<DirectionState<V, E>>,
    answer: Arc<SharedAnswer<V>>,
    expander: Arc<dyn Expander<V, E>>,
    handle: Option<JoinHandle<Result<(), SearchError>>>,
}

impl<V, E> ParallelSearcher<V, E>
where
    V: Clone + Eq + Hash + Send + 'static,
    E: Send + 'static,
{
    pub fn new(
        own: Arc<DirectionState<V, E>>,
        peer: Arc<DirectionState<V, E>>,
        answer: Arc<SharedAnswer<V>>,
        expander: Arc<dyn Expander<V, E>>,
    ) -> ParallelSearcher<V, E> {
        ParallelSearcher {
            own,
            peer,
            answer,
            expander,
            handle: None,
        }
    }

    pub fn start(&mut self) -> Result<(), SearchError> {
        let own = Arc::clone(&self.own);
        let peer = Arc::clone(&self.peer);
        let answer = Arc::clone(&self.answer);
        let expander = Arc::clone(&self.expander);

        let handle = thread::Builder::new()
            .name(format!("{} search", own.direction()))
            .spawn(move || run(&own, &peer, &answer, &*expander))
            .map_err(|error| SearchError::Internal(error.to_string()))?;
        self.handle = Some(handle);

        Ok(())
    }

    /// Blocks until the search thread terminated and returns its outcome.
    pub fn join(&mut self) -> Result<(), SearchError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        handle
            .join()
            .unwrap_or_else(|payload| Err(SearchError::Internal(panic_message(&*payload))))
    }
}

fn run<V, E>(
    own: &DirectionState<V, E>,
    peer: &DirectionState<V, E>,
    answer: &SharedAnswer<V>,
    expander: &dyn Expander<V, E>,
) -> Result<(), SearchError>
where
    V: Clone + Eq + Hash,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        search_until_bingo(own, peer, answer, expander)
    }))
    .unwrap_or_else(|payload| Err(SearchError::Internal(panic_message(&*payload))));

    if let Err(error) = &result {
        warn!("{} search failed: {}", own.direction(), error);
    }

    // Reached on bingo, on exhaustion (no path possible) and on failure. In
    // every case the peer has nothing left to wait for.
    answer.declare_bingo();

    result
}

fn search_until_bingo<V, E>(
    own: &DirectionState<V, E>,
    peer: &DirectionState<V, E>,
    answer: &SharedAnswer<V>,
    expander: &dyn Expander<V, E>,
) -> Result<(), SearchError>
where
    V: Clone + Eq + Hash,
{
    let mut neighbors = Vec::new();

    let mut next = own.pop_minimal();
    while let Some((vertex, weight)) = next.filter(|_| !answer.bingo()) {
        settle(own, peer, answer, expander, &mut neighbors, &vertex, weight)?;
        next = own.complete_and_pop(&vertex)?;
    }

    debug!(
        "{} search stopped after settling {} vertices",
        own.direction(),
        own.search_space_size()
    );

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return format!("search thread panicked: {}", message);
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return format!("search thread panicked: {}", message);
    }
    "search thread panicked".to_string()
}
