use std::{cell::Cell, sync::Arc};

use weighted_paths::{
    graphs::{path::ShortestPath, reversible_vec_graph::ReversibleVecGraph, EdgeId, VertexId},
    PathFinder, PathFinderConfig, SearchError, SearchState, Step,
};

const A: VertexId = 0;
const B: VertexId = 1;
const C: VertexId = 2;
const D: VertexId = 3;

fn graph_path_finder(graph: ReversibleVecGraph, bidirectional: bool) -> PathFinder<VertexId, EdgeId> {
    let graph = Arc::new(graph);
    PathFinder::new(
        graph.forward_expander(),
        graph.backward_expander(),
        bidirectional,
    )
}

fn small_graph() -> ReversibleVecGraph {
    // A -1-> B -1-> D, A -5-> C -1-> D
    let mut graph = ReversibleVecGraph::new();
    graph.add_edge(A, B, 1.0);
    graph.add_edge(B, D, 1.0);
    graph.add_edge(A, C, 5.0);
    graph.add_edge(C, D, 1.0);
    graph
}

#[test]
fn finds_lighter_of_two_routes() {
    for bidirectional in [true, false] {
        let mut path_finder = graph_path_finder(small_graph(), bidirectional);

        let path = path_finder.shortest_path(&A, &D, &|| Ok(())).unwrap();
        assert_eq!(
            path,
            Some(ShortestPath {
                vertices: vec![A, B, D],
                edges: vec![0, 1],
                weight: 2.0,
            })
        );
        assert_eq!(path_finder.state(), SearchState::Found);

        let path = path_finder.shortest_path_parallel(&A, &D).unwrap();
        assert_eq!(path.map(|path| path.vertices), Some(vec![A, B, D]));
        assert_eq!(path_finder.state(), SearchState::Found);
    }
}

#[test]
fn unreachable_target() {
    let mut graph = small_graph();
    graph.add_edge(4, 5, 1.0);

    for bidirectional in [true, false] {
        let mut path_finder = graph_path_finder(graph.clone(), bidirectional);

        assert_eq!(path_finder.shortest_path(&A, &5, &|| Ok(())).unwrap(), None);
        assert_eq!(path_finder.state(), SearchState::NotFound);

        assert_eq!(path_finder.shortest_path_parallel(&D, &A).unwrap(), None);
        assert_eq!(path_finder.state(), SearchState::NotFound);
    }
}

#[test]
fn result_is_cleared_when_nothing_is_found() {
    let mut path_finder = graph_path_finder(small_graph(), true);
    let mut path = ShortestPath {
        vertices: vec![7, 8],
        edges: vec![9],
        weight: 3.0,
    };

    assert!(!path_finder.shortest_path_into(&D, &A, &mut path, &|| Ok(())).unwrap());
    assert!(path.is_empty());
    assert!(path.edges.is_empty());
    assert_eq!(path.weight, 0.0);
}

#[test]
fn zero_weight_edge_next_to_start() {
    let mut graph = ReversibleVecGraph::new();
    graph.add_edge(A, B, 0.0);
    graph.add_edge(B, C, 5.0);

    let mut path_finder = graph_path_finder(graph, true);
    let path = path_finder.shortest_path(&A, &C, &|| Ok(())).unwrap().unwrap();
    assert_eq!(path.vertices, vec![A, B, C]);
    assert_eq!(path.weight, 5.0);

    let path = path_finder.shortest_path_parallel(&A, &C).unwrap().unwrap();
    assert_eq!(path.vertices, vec![A, B, C]);
    assert_eq!(path.weight, 5.0);
}

#[test]
fn start_equals_target() {
    let mut path_finder = graph_path_finder(small_graph(), true);

    let path = path_finder.shortest_path(&B, &B, &|| Ok(())).unwrap().unwrap();
    assert_eq!(path.vertices, vec![B]);
    assert!(path.edges.is_empty());
    assert_eq!(path.weight, 0.0);

    let path = path_finder.shortest_path_parallel(&B, &B).unwrap().unwrap();
    assert_eq!(path.vertices, vec![B]);
    assert_eq!(path.weight, 0.0);
}

#[test]
fn repeated_searches_give_same_result() {
    let mut path_finder = graph_path_finder(small_graph(), true);

    let first = path_finder.shortest_path(&A, &D, &|| Ok(())).unwrap();
    let unrelated = path_finder.shortest_path(&C, &D, &|| Ok(())).unwrap();
    let second = path_finder.shortest_path(&A, &D, &|| Ok(())).unwrap();

    assert_eq!(unrelated.map(|path| path.weight), Some(1.0));
    assert_eq!(first, second);
    assert_eq!(path_finder.shortest_path_weight(&A, &D).unwrap(), Some(2.0));
}

#[test]
fn statistics_count_completed_vertices() {
    let mut graph = ReversibleVecGraph::new();
    for vertex in 0..100 {
        graph.add_edge(vertex, vertex + 1, 1.0);
    }

    let mut path_finder = graph_path_finder(graph.clone(), false);
    assert_eq!(path_finder.state(), SearchState::Idle);
    path_finder.shortest_path(&0, &100, &|| Ok(())).unwrap();
    let statistics = path_finder.statistics();
    assert_eq!(statistics.backward_settled, 0);
    assert_eq!(statistics.forward_settled, 101);
    // Only the target seed waits in the backward queue.
    assert_eq!(statistics.forward_queued, 0);
    assert_eq!(statistics.backward_queued, 1);

    let mut path_finder = graph_path_finder(graph, true);
    assert!(path_finder.config().bidirectional);
    path_finder.shortest_path(&0, &100, &|| Ok(())).unwrap();
    let statistics = path_finder.statistics();
    assert!(statistics.forward_settled > 0);
    assert!(statistics.backward_settled > 0);
    assert!(statistics.forward_settled < 100);
}

#[test]
fn cancellation_is_reported_as_failure() {
    let mut graph = ReversibleVecGraph::new();
    for vertex in 0..1_000 {
        graph.add_edge(vertex, vertex + 1, 1.0);
    }
    let mut path_finder = graph_path_finder(graph, true);

    let calls = Cell::new(0);
    let cancel = || {
        calls.set(calls.get() + 1);
        if calls.get() == 3 {
            return Err(SearchError::Cancelled);
        }
        Ok(())
    };

    let result = path_finder.shortest_path(&0, &1_000, &cancel);
    assert_eq!(result, Err(SearchError::Cancelled));
    assert_eq!(calls.get(), 3);
    assert_eq!(path_finder.state(), SearchState::Failed);

    // The next search starts from scratch.
    let path = path_finder.shortest_path(&0, &1_000, &|| Ok(())).unwrap().unwrap();
    assert_eq!(path.weight, 1_000.0);
    assert_eq!(path_finder.state(), SearchState::Found);
}

#[test]
fn cancellation_is_checked_at_configured_interval() {
    let mut graph = ReversibleVecGraph::new();
    for vertex in 0..100 {
        graph.add_edge(vertex, vertex + 1, 1.0);
    }
    let graph = Arc::new(graph);
    let config = PathFinderConfig {
        bidirectional: false,
        cancel_check_interval: 25,
    };
    let mut path_finder: PathFinder<VertexId, EdgeId> = PathFinder::with_config(
        Arc::new(graph.forward_expander()),
        Arc::new(graph.backward_expander()),
        config,
    );

    let calls = Cell::new(0);
    path_finder
        .shortest_path(&0, &100, &|| {
            calls.set(calls.get() + 1);
            Ok(())
        })
        .unwrap();

    // 101 forward iterations, the last one finds the target.
    assert_eq!(calls.get(), 4);
}

fn failing_expander(vertex: &u32, neighbors: &mut Vec<Step<u32, u32>>) -> Result<(), SearchError> {
    if *vertex == 2 {
        return Err(SearchError::Internal("broken vertex".to_string()));
    }
    neighbors.push(Step::candidate(vertex + 1, *vertex, *vertex, 1.0));
    Ok(())
}

fn backward_chain(vertex: &u32, neighbors: &mut Vec<Step<u32, u32>>) -> Result<(), SearchError> {
    if *vertex > 0 {
        neighbors.push(Step::candidate(vertex - 1, *vertex, vertex - 1, 1.0));
    }
    Ok(())
}

#[test]
fn expander_error_fails_search() {
    let mut path_finder: PathFinder<u32, u32> = PathFinder::new(failing_expander, backward_chain, false);

    let error = SearchError::Internal("broken vertex".to_string());
    assert_eq!(path_finder.shortest_path(&0, &10, &|| Ok(())), Err(error.clone()));
    assert_eq!(path_finder.state(), SearchState::Failed);

    assert_eq!(path_finder.shortest_path_parallel(&0, &10), Err(error));
    assert_eq!(path_finder.state(), SearchState::Failed);
}

#[test]
fn forward_error_is_preferred() {
    let backward_failure = |_: &u32, _: &mut Vec<Step<u32, u32>>| -> Result<(), SearchError> {
        Err(SearchError::OutOfMemory)
    };
    let forward_failure = |_: &u32, _: &mut Vec<Step<u32, u32>>| -> Result<(), SearchError> {
        Err(SearchError::Cancelled)
    };
    let mut path_finder: PathFinder<u32, u32> = PathFinder::new(forward_failure, backward_failure, true);

    // Both workers fail on their seed, the forward error wins.
    assert_eq!(
        path_finder.shortest_path_parallel(&0, &10),
        Err(SearchError::Cancelled)
    );
}

#[test]
fn panicking_worker_becomes_internal_error() {
    let panicking = |vertex: &u32, _: &mut Vec<Step<u32, u32>>| -> Result<(), SearchError> {
        panic!("cannot expand {}", vertex)
    };
    let mut path_finder: PathFinder<u32, u32> = PathFinder::new(panicking, backward_chain, true);

    let result = path_finder.shortest_path_parallel(&0, &10);
    assert!(
        matches!(result, Err(SearchError::Internal(message)) if message.contains("cannot expand 0"))
    );
    assert_eq!(path_finder.state(), SearchState::Failed);
}

#[test]
fn invalid_weight_is_rejected() {
    let negative = |vertex: &u32, neighbors: &mut Vec<Step<u32, u32>>| -> Result<(), SearchError> {
        neighbors.push(Step::candidate(vertex + 1, *vertex, 0, -1.0));
        Ok(())
    };
    let mut path_finder: PathFinder<u32, u32> = PathFinder::new(negative, backward_chain, false);

    assert_eq!(
        path_finder.shortest_path(&0, &10, &|| Ok(())),
        Err(SearchError::InvalidWeight { weight: -1.0 })
    );
    assert_eq!(
        path_finder.shortest_path_parallel(&0, &10),
        Err(SearchError::InvalidWeight { weight: -1.0 })
    );
}

#[test]
fn generic_vertices() {
    // 5x5 grid, stepping right costs 1 and stepping down costs 2.
    type Tile = (i32, i32);
    fn grid(forward: bool) -> impl Fn(&Tile, &mut Vec<Step<Tile, char>>) -> Result<(), SearchError> {
        move |&(x, y), neighbors| {
            let sign = if forward { 1 } else { -1 };
            for (next, edge, weight) in [((x + sign, y), 'r', 1.0), ((x, y + sign), 'd', 2.0)] {
                if (0..5).contains(&next.0) && (0..5).contains(&next.1) {
                    neighbors.push(Step::candidate(next, (x, y), edge, weight));
                }
            }
            Ok(())
        }
    }

    let mut path_finder = PathFinder::new(grid(true), grid(false), true);
    let path = path_finder
        .shortest_path(&(0, 0), &(4, 4), &|| Ok(()))
        .unwrap()
        .unwrap();

    assert_eq!(path.weight, 12.0);
    assert_eq!(path.vertices.first(), Some(&(0, 0)));
    assert_eq!(path.vertices.last(), Some(&(4, 4)));
    assert_eq!(path.edges.iter().filter(|&&edge| edge == 'r').count(), 4);
    assert_eq!(path.edges.iter().filter(|&&edge| edge == 'd').count(), 4);
}
