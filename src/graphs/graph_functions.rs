use std::sync::Arc;

use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rand::prelude::*;
use rayon::prelude::*;

use super::{
    path::{ShortestPath, ShortestPathRequest, ShortestPathTestCase},
    reversible_vec_graph::ReversibleVecGraph,
    Weight,
};
use crate::{error::SearchError, search::dijkstra::dijkstra_one_to_one_weight};

/// Check if a path is correct for a given test case.
pub fn validate_path(
    graph: &ReversibleVecGraph,
    validation: &ShortestPathTestCase,
    path: &Option<ShortestPath>,
) -> Result<(), String> {
    let (path, weight) = match (path, validation.weight) {
        (Some(path), Some(weight)) => (path, weight),
        (None, None) => return Ok(()),
        (Some(_), None) => return Err("a path was found where there should be none".to_string()),
        (None, Some(_)) => return Err("no path is found but there should be one".to_string()),
    };

    if !weights_match(path.weight, weight) {
        return Err(format!(
            "wrong path weight, expected {} but got {}",
            weight, path.weight
        ));
    }

    // Ensure fist and last vertex of path are source and target of request.
    if path.vertices.first() != Some(&validation.request.source()) {
        return Err("first vertex of path is not source of request".to_string());
    }
    if path.vertices.last() != Some(&validation.request.target()) {
        return Err("last vertex of path is not target of request".to_string());
    }
    if path.edges.len() + 1 != path.vertices.len() {
        return Err("number of edges does not match number of vertices".to_string());
    }

    // check if every edge connects its consecutive path vertices.
    let mut true_weight = 0.0;
    for ((&tail, &head), &edge) in path.vertices.iter().tuple_windows().zip(&path.edges) {
        let edge = graph
            .get_edge(tail, edge)
            .filter(|candidate| candidate.head() == head)
            .ok_or_else(|| format!("no edge {} between {} and {} found", edge, tail, head))?;
        true_weight += edge.weight();
    }

    if !weights_match(true_weight, weight) {
        return Err(format!(
            "edges of path weigh {} but path claims {}",
            true_weight, weight
        ));
    }

    Ok(())
}

/// Weights summed in different order may differ in the last bits.
pub fn weights_match(a: Weight, b: Weight) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Random graph with integral weights in `0..max_weight`, so path weights
/// are exact.
pub fn random_graph(
    rng: &mut impl Rng,
    number_of_vertices: u32,
    number_of_edges: u32,
    max_weight: u32,
) -> ReversibleVecGraph {
    let mut graph = ReversibleVecGraph::new();
    if number_of_vertices == 0 {
        return graph;
    }

    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        let weight = rng.gen_range(0..max_weight.max(1)) as Weight;
        graph.add_edge(tail, head, weight);
    }

    graph
}

/// Random source and target pairs together with the weight of their shortest
/// path computed by a plain Dijkstra.
pub fn generate_random_pair_test_cases(
    graph: &Arc<ReversibleVecGraph>,
    number_of_testcases: u32,
) -> Result<Vec<ShortestPathTestCase>, SearchError> {
    let number_of_vertices = graph.number_of_vertices().max(1);
    let expander = graph.forward_expander();

    (0..number_of_testcases)
        .into_par_iter()
        .progress_count(number_of_testcases as u64)
        .map_init(rand::thread_rng, |rng, _| {
            let request = ShortestPathRequest::new(
                rng.gen_range(0..number_of_vertices),
                rng.gen_range(0..number_of_vertices),
            );
            let weight =
                dijkstra_one_to_one_weight(&expander, &request.source(), &request.target())?;

            Ok::<_, SearchError>(ShortestPathTestCase { request, weight })
        })
        .collect()
}
