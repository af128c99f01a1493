use std::path::Path;

use clap::ValueEnum;
use error::GraphReadError;
use graphs::{dimacs::read_graph_from_dimacs_file, read_graph_from_bincode_file, Graph};
use tracing::info;
use utility::get_progressspinner;

pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum FileType {
    /// DIMACS shortest path challenge format (`.gr`).
    Dimacs,
    /// Graph cached with `dimacs_to_bincode`.
    Bincode,
}

pub fn read_graph(path: &Path, file_type: FileType) -> Result<Graph, GraphReadError> {
    let graph = match file_type {
        FileType::Dimacs => read_graph_from_dimacs_file(path)?,
        FileType::Bincode => {
            let spinner = get_progressspinner("Reading graph");
            let graph = read_graph_from_bincode_file(path)?;
            spinner.finish_and_clear();
            graph
        }
    };
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "Read graph from {}",
        path.display()
    );
    Ok(graph)
}
