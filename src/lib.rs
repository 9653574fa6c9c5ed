pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::{GraphError, SearchError};
pub use search::{
    path_finder::{PathFinder, PathFinderConfig, SearchState, SearchStatistics},
    step::Step,
};
