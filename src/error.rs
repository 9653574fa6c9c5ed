use thiserror::Error;

use crate::graphs::Weight;

/// Failures of a shortest path search.
///
/// Not finding a path is not an error, searches report it as `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("search was cancelled")]
    Cancelled,
    #[error("out of memory while expanding the search frontier")]
    OutOfMemory,
    #[error("edge weight {weight} is not a finite non-negative number")]
    InvalidWeight { weight: Weight },
    #[error("internal search error: {0}")]
    Internal(String),
}

impl From<std::collections::TryReserveError> for SearchError {
    fn from(_: std::collections::TryReserveError) -> Self {
        SearchError::OutOfMemory
    }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unable to read graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse line {line}: {content}")]
    Parse { line: usize, content: String },
}
