use std::path::PathBuf;

use alt_paths::graphs::{dimacs::read_graph_from_dimacs_file, write_graph_to_bincode_file};
use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};

/// Converts a DIMACS graph into the bincode format read by `alt_benchmark`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// DIMACS graph file
    #[arg(short, long)]
    in_file: PathBuf,
    /// Bincode output file
    #[arg(short, long)]
    out_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let args = Args::parse();

    let graph = read_graph_from_dimacs_file(&args.in_file)
        .with_context(|| format!("could not read {}", args.in_file.display()))?;
    write_graph_to_bincode_file(&graph, &args.out_file)
        .with_context(|| format!("could not write {}", args.out_file.display()))?;

    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "Wrote {}",
        args.out_file.display()
    );
    Ok(())
}
