use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use super::{
    edge::DirectedWeightedEdge, reversible_vec_graph::ReversibleVecGraph, EdgeId, Weight,
};
use crate::error::GraphError;

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads a graph in DIMACS `.gr` format.
    ///
    /// Only arc lines (`a tail head cost`) are used, vertex ids are kept as
    /// they are. Edge ids are assigned in file order.
    pub fn from_gr_file(path: &Path) -> Result<ReversibleVecGraph, GraphError> {
        let file = File::open(path)?;
        Self::from_gr_reader(file)
    }

    pub fn from_gr_reader(reader: impl Read) -> Result<ReversibleVecGraph, GraphError> {
        let reader = BufReader::new(reader);
        let mut edges = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let mut values = line.split_whitespace();
            if values.next() != Some("a") {
                continue;
            }

            let parse_error = || GraphError::Parse {
                line: index + 1,
                content: line.clone(),
            };
            let tail: u32 = values
                .next()
                .and_then(|value| value.parse().ok())
                .ok_or_else(parse_error)?;
            let head: u32 = values
                .next()
                .and_then(|value| value.parse().ok())
                .ok_or_else(parse_error)?;
            let weight: Weight = values
                .next()
                .and_then(|value| value.parse().ok())
                .filter(|weight| super::is_valid_weight(*weight))
                .ok_or_else(parse_error)?;

            let id = edges.len() as EdgeId;
            edges.push(DirectedWeightedEdge::new(id, tail, head, weight));
        }

        Ok(ReversibleVecGraph::from_edges(&edges))
    }
}

#[cfg(test)]
mod tests {
    use super::GraphFactory;
    use crate::error::GraphError;

    #[test]
    fn reads_arcs_and_skips_other_lines() {
        let content = "c comment\np sp 3 2\na 0 1 2.5\na 1 2 4\n";
        let graph = GraphFactory::from_gr_reader(content.as_bytes()).unwrap();

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.get_edge(0, 0).unwrap().weight(), 2.5);
        assert_eq!(graph.get_edge(1, 1).unwrap().head(), 2);
    }

    #[test]
    fn reports_broken_line() {
        let content = "a 0 1 2\na 1 x 3\n";
        let error = GraphFactory::from_gr_reader(content.as_bytes())
            .err()
            .unwrap();

        assert!(matches!(error, GraphError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_negative_weight() {
        let content = "a 0 1 -2\n";
        assert!(GraphFactory::from_gr_reader(content.as_bytes()).is_err());
    }
}
