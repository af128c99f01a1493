use std::{
    fs::File,
    io::BufWriter,
    path::PathBuf,
    time::{Duration, Instant},
};

use alt_paths::{
    graphs::INFINITY,
    read_graph,
    search::{
        alt::{
            landmark::{compute_heuristic, select_landmarks},
            query::alt,
        },
        collections::dary_heap::DEFAULT_ARITY,
        dijkstra::{dijkstra_one_to_all, dijkstra_one_to_one},
        path::ShortestPathTimingResult,
    },
    utility::random_requests,
    FileType,
};
use anyhow::{ensure, Context};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, Level};

/// Compares Dijkstra and ALT on random queries of a road network.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file
    #[arg(short, long)]
    graph: PathBuf,
    /// Format of the graph file
    #[arg(short, long, value_enum, default_value = "dimacs")]
    file_type: FileType,
    /// Number of random queries
    #[arg(short, long, default_value = "5")]
    number_of_queries: u32,
    /// Number of landmarks
    #[arg(short = 'l', long, default_value = "16")]
    number_of_landmarks: u32,
    /// Seed for landmarks and queries, drawn from entropy if not set
    #[arg(short, long)]
    seed: Option<u64>,
    /// Write the per query results as JSON
    #[arg(short, long)]
    out_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let args = Args::parse();

    let mut graph = read_graph(&args.graph, args.file_type)
        .with_context(|| format!("could not read {}", args.graph.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let requests = random_requests(&graph, args.number_of_queries, &mut rng);

    let start = Instant::now();
    for request in requests.iter() {
        dijkstra_one_to_all::<DEFAULT_ARITY>(&graph, request.source)?;
    }
    info!(
        "Dijkstra one to all: {:?} for {} sources",
        start.elapsed(),
        requests.len()
    );

    let start = Instant::now();
    let landmarks = select_landmarks(&graph, args.number_of_landmarks, &mut rng)?;
    info!(
        "Landmarks: {:?} for {} landmarks",
        start.elapsed(),
        landmarks.len()
    );

    let mut results = Vec::with_capacity(requests.len());
    for &request in requests.iter() {
        let start = Instant::now();
        let dijkstra_distance =
            dijkstra_one_to_one::<DEFAULT_ARITY>(&graph, request.source, request.target)?;
        let dijkstra_duration = start.elapsed();

        // heuristic preparation is part of every ALT query
        let start = Instant::now();
        compute_heuristic(&mut graph, &landmarks, request.target)?;
        let alt_distance = alt::<DEFAULT_ARITY>(&graph, request.source, request.target)?;
        let alt_duration = start.elapsed();

        ensure!(
            alt_distance == dijkstra_distance,
            "ALT found {} but Dijkstra found {} for {:?}",
            alt_distance,
            dijkstra_distance,
            request
        );

        results.push(ShortestPathTimingResult {
            request,
            distance: (alt_distance != INFINITY).then_some(alt_distance),
            dijkstra_seconds: dijkstra_duration.as_secs_f64(),
            alt_seconds: alt_duration.as_secs_f64(),
        });
    }

    if !results.is_empty() {
        let number_of_results = results.len() as f64;
        let dijkstra_seconds: f64 = results.iter().map(|result| result.dijkstra_seconds).sum();
        let alt_seconds: f64 = results.iter().map(|result| result.alt_seconds).sum();
        info!(
            "Average duration dijkstra one to one {:?}, alt {:?}",
            Duration::from_secs_f64(dijkstra_seconds / number_of_results),
            Duration::from_secs_f64(alt_seconds / number_of_results)
        );
    }

    if let Some(out_file) = args.out_file {
        let writer = BufWriter::new(
            File::create(&out_file)
                .with_context(|| format!("could not create {}", out_file.display()))?,
        );
        serde_json::to_writer_pretty(writer, &results)?;
    }

    Ok(())
}
