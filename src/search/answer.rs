use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, MutexGuard};

use super::frontier::PeerEntry;
use crate::graphs::Weight;

/// Best meeting point observed so far by either direction.
#[derive(Clone, Debug, PartialEq)]
pub struct BestAnswer<V> {
    highscore: Option<Weight>,
    intermediate: Option<V>,
}

impl<V> Default for BestAnswer<V> {
    fn default() -> Self {
        BestAnswer {
            highscore: None,
            intermediate: None,
        }
    }
}

impl<V: Clone> BestAnswer<V> {
    pub fn highscore(&self) -> Option<Weight> {
        self.highscore
    }

    pub fn intermediate(&self) -> Option<&V> {
        self.intermediate.as_ref()
    }

    /// Records that `vertex`, reached with `weight` by the probing direction,
    /// is known to the peer direction as `peer`.
    ///
    /// Returns true if the search may stop.
    pub fn record_meeting(&mut self, vertex: &V, weight: Weight, peer: PeerEntry) -> bool {
        let total = peer.weight + weight;

        if self.highscore.map_or(true, |highscore| total < highscore) {
            self.highscore = Some(total);
            self.intermediate = Some(vertex.clone());
        }

        // Completed by both directions: no better meeting point can show up
        // anymore, even if the highscore belongs to another vertex.
        if peer.done {
            if self.highscore.map_or(true, |highscore| total <= highscore) {
                self.intermediate = Some(vertex.clone());
            }
            return true;
        }

        // The peer has not left its seed, so this direction reached the
        // other end on its own and every lighter vertex is already done.
        if peer.weight == 0.0 {
            self.intermediate = Some(vertex.clone());
            return true;
        }

        false
    }
}

/// Best answer record shared by both search directions.
///
/// `bingo` is read without locking, all writes that decide the answer happen
/// under the mutex.
pub struct SharedAnswer<V> {
    best: Mutex<BestAnswer<V>>,
    bingo: AtomicBool,
}

impl<V> Default for SharedAnswer<V> {
    fn default() -> Self {
        SharedAnswer {
            best: Mutex::new(BestAnswer::default()),
            bingo: AtomicBool::new(false),
        }
    }
}

impl<V: Clone> SharedAnswer<V> {
    pub fn reset(&self) {
        *self.best.lock() = BestAnswer::default();
        self.bingo.store(false, Ordering::Release);
    }

    pub fn bingo(&self) -> bool {
        self.bingo.load(Ordering::Acquire)
    }

    pub fn declare_bingo(&self) {
        self.bingo.store(true, Ordering::Release);
    }

    pub fn lock(&self) -> MutexGuard<'_, BestAnswer<V>> {
        self.best.lock()
    }

    pub fn snapshot(&self) -> BestAnswer<V> {
        self.best.lock().clone()
    }
}
