use std::{error::Error, path::PathBuf, sync::Arc, time::Instant};

use clap::Parser;
use log::info;
use weighted_paths::{
    graphs::{graph_factory::GraphFactory, VertexId},
    utility::init_logging,
    PathFinder,
};

/// Searches a single shortest path and prints it as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in `.gr` format
    #[arg(short, long)]
    graph: PathBuf,
    /// Start vertex
    #[arg(short, long)]
    source: VertexId,
    /// Target vertex
    #[arg(short, long)]
    target: VertexId,
    /// Run each search direction on its own thread
    #[arg(short, long)]
    parallel: bool,
    /// Only expand forward from the source
    #[arg(short, long)]
    unidirectional: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = init_logging()?;

    info!("Reading graph");
    let graph = Arc::new(GraphFactory::from_gr_file(&args.graph)?);
    info!(
        "Graph has {} vertices and {} edges",
        graph.number_of_vertices(),
        graph.number_of_edges()
    );

    let mut path_finder = PathFinder::new(
        graph.forward_expander(),
        graph.backward_expander(),
        !args.unidirectional,
    );

    info!("Searching with {:?}", path_finder.config());
    let start = Instant::now();
    let path = if args.parallel {
        path_finder.shortest_path_parallel(&args.source, &args.target)?
    } else {
        path_finder.shortest_path(&args.source, &args.target, &|| Ok(()))?
    };
    info!(
        "Search took {:?}, {:?}",
        start.elapsed(),
        path_finder.statistics()
    );

    match path {
        Some(path) => println!("{}", serde_json::to_string(&path)?),
        None => println!("no path from {} to {}", args.source, args.target),
    }

    Ok(())
}
