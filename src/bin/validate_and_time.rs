use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use clap::Parser;
use log::info;
use weighted_paths::{
    graphs::{
        graph_factory::GraphFactory,
        graph_functions::validate_path,
        path::{ShortestPathTestCase, ShortestPathTestTimingResult},
    },
    utility::{get_progressbar_long_jobs, init_logging},
    PathFinder,
};

/// Runs every test case with the cooperative and the parallel search,
/// validates the returned paths and reports the average query times.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in `.gr` format
    #[arg(short, long)]
    graph: PathBuf,
    /// Path of the test cases
    #[arg(short, long)]
    test_cases: PathBuf,
    /// Only expand forward from the source
    #[arg(short, long)]
    unidirectional: bool,
    /// Path where the results shall be saved
    #[arg(short = 'r', long)]
    timing_results: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = init_logging()?;

    info!("Reading test cases");
    let reader = BufReader::new(File::open(&args.test_cases)?);
    let test_cases: Vec<ShortestPathTestCase> = serde_json::from_reader(reader)?;

    info!("Reading graph");
    let graph = Arc::new(GraphFactory::from_gr_file(&args.graph)?);
    let mut path_finder = PathFinder::new(
        graph.forward_expander(),
        graph.backward_expander(),
        !args.unidirectional,
    );

    info!("Testing & validating");
    let bar = get_progressbar_long_jobs("validating", test_cases.len() as u64);
    let mut results = Vec::with_capacity(test_cases.len());
    for test_case in test_cases.iter() {
        let source = test_case.request.source();
        let target = test_case.request.target();

        let start = Instant::now();
        let path = path_finder.shortest_path(&source, &target, &|| Ok(()))?;
        let cooperative_seconds = start.elapsed().as_secs_f64();
        validate_path(&graph, test_case, &path)
            .map_err(|error| format!("cooperative search {} -> {}: {}", source, target, error))?;

        let start = Instant::now();
        let path = path_finder.shortest_path_parallel(&source, &target)?;
        let parallel_seconds = start.elapsed().as_secs_f64();
        validate_path(&graph, test_case, &path)
            .map_err(|error| format!("parallel search {} -> {}: {}", source, target, error))?;

        results.push(ShortestPathTestTimingResult {
            test_case: test_case.clone(),
            cooperative_seconds,
            parallel_seconds,
        });
        bar.inc(1);
    }
    bar.finish_and_clear();

    let number_of_results = results.len().max(1) as f64;
    let cooperative_average = results
        .iter()
        .map(|result| result.cooperative_seconds)
        .sum::<f64>()
        / number_of_results;
    let parallel_average = results
        .iter()
        .map(|result| result.parallel_seconds)
        .sum::<f64>()
        / number_of_results;

    info!(
        "All correct. Took {:?} (cooperative) and {:?} (parallel) per query averaged over {} queries",
        Duration::from_secs_f64(cooperative_average),
        Duration::from_secs_f64(parallel_average),
        results.len()
    );

    if let Some(timing_results) = args.timing_results {
        info!("Writing timing results");
        let writer = BufWriter::new(File::create(timing_results)?);
        serde_json::to_writer(writer, &results)?;
    }

    Ok(())
}
