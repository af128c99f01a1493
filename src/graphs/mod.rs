use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use crate::error::GraphReadError;
use edge::Edge;

pub mod dimacs;
pub mod edge;
pub mod graph;

pub use graph::Graph;

pub type Vertex = u32;
pub type EdgeId = u32;
pub type Distance = u64;

/// Distance of every vertex that cannot be reached.
pub const INFINITY: Distance = Distance::MAX;

/// Which way edges are followed during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges from tail to head.
    Forward,
    /// Follow edges from head to tail, i.e. search the reversed graph.
    Backward,
}

impl Direction {
    /// The endpoint of `edge` a search in this direction arrives at.
    pub fn next_vertex(self, edge: &Edge) -> Vertex {
        match self {
            Direction::Forward => edge.head(),
            Direction::Backward => edge.tail(),
        }
    }
}

pub fn read_graph_from_bincode_file(path: &Path) -> Result<Graph, GraphReadError> {
    read_graph_from_bincode(BufReader::new(File::open(path)?))
}

/// Decodes a graph written by [`write_graph_to_bincode_file`] and checks its
/// adjacency lists. The heuristic starts out as all zeros.
pub fn read_graph_from_bincode<R: Read>(reader: R) -> Result<Graph, GraphReadError> {
    let mut graph: Graph = bincode::deserialize_from(reader)?;
    graph.validate()?;
    Ok(graph)
}

pub fn write_graph_to_bincode_file(graph: &Graph, path: &Path) -> Result<(), GraphReadError> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, graph)?;
    Ok(())
}
