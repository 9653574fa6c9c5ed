pub mod answer;
pub mod dijkstra;
pub mod direction;
pub mod expander;
pub mod frontier;
pub mod parallel_searcher;
pub mod path_finder;
pub mod searcher;
pub mod step;
