use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, BinaryHeap},
    hash::Hash,
};

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use super::expander::Expander;
use crate::{
    error::SearchError,
    graphs::{is_valid_weight, Weight},
};

/// Plain unidirectional Dijkstra without decrease-key, used as reference for
/// the bidirectional searches.
#[derive(Clone, PartialEq)]
struct DijkstraQueueElement<V> {
    weight: Weight,
    vertex: V,
}

impl<V: PartialEq> Eq for DijkstraQueueElement<V> {}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<V: PartialEq> Ord for DijkstraQueueElement<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight.total_cmp(&self.weight)
    }
}

impl<V: PartialEq> PartialOrd for DijkstraQueueElement<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn dijkstra_one_to_one_weight<V, E, X>(
    expander: &X,
    source: &V,
    target: &V,
) -> Result<Option<Weight>, SearchError>
where
    V: Clone + Eq + Hash,
    X: Expander<V, E> + ?Sized,
{
    let weights = search::<V, E, X>(expander, source, target)?;
    Ok(weights.get(target).copied())
}

/// Settles vertices in weight order until `target` is settled or nothing is
/// left.
fn search<V, E, X>(
    expander: &X,
    source: &V,
    target: &V,
) -> Result<HashMap<V, Weight>, SearchError>
where
    V: Clone + Eq + Hash,
    X: Expander<V, E> + ?Sized,
{
    let mut weights = HashMap::new();
    let mut expanded = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut neighbors = Vec::new();

    weights.insert(source.clone(), 0.0);
    queue.push(DijkstraQueueElement {
        weight: 0.0,
        vertex: source.clone(),
    });

    while let Some(DijkstraQueueElement { weight, vertex }) = queue.pop() {
        // Without decrease-key a vertex may be queued several times.
        if !expanded.insert(vertex.clone()) {
            continue;
        }
        if &vertex == target {
            break;
        }

        neighbors.clear();
        expander.expand(&vertex, &mut neighbors)?;
        for neighbor in neighbors.drain(..) {
            if !is_valid_weight(neighbor.weight) {
                return Err(SearchError::InvalidWeight {
                    weight: neighbor.weight,
                });
            }
            let alternative_weight = weight + neighbor.weight;
            match weights.entry(neighbor.vertex.clone()) {
                Entry::Occupied(mut entry) => {
                    if alternative_weight >= *entry.get() {
                        continue;
                    }
                    entry.insert(alternative_weight);
                }
                Entry::Vacant(entry) => {
                    entry.insert(alternative_weight);
                }
            }
            queue.push(DijkstraQueueElement {
                weight: alternative_weight,
                vertex: neighbor.vertex,
            });
        }
    }

    Ok(weights)
}
