use thiserror::Error;

use crate::graphs::{EdgeId, Vertex};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("vertex {vertex} is out of range, graph has {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: Vertex,
        number_of_vertices: u32,
    },
    #[error("edge {edge} is out of range, graph has {number_of_edges} edges")]
    EdgeOutOfRange { edge: EdgeId, number_of_edges: u32 },
    #[error("cannot pick {requested} distinct landmarks from {available} vertices")]
    NotEnoughVertices { requested: u32, available: u32 },
    #[error("vertex {vertex} is already a landmark")]
    DuplicateLandmark { vertex: Vertex },
    #[error("landmark {vertex} has {found} distances, graph has {expected} vertices")]
    LandmarkMismatch {
        vertex: Vertex,
        expected: u32,
        found: usize,
    },
    #[error("heuristic has {found} values, graph has {expected} vertices")]
    HeuristicLength { expected: u32, found: usize },
    #[error("heuristic was computed for destination {prepared}, not {requested}")]
    HeuristicDestinationMismatch { prepared: Vertex, requested: Vertex },
    #[error("heuristic is inconsistent on edge {tail} -> {head}")]
    InconsistentHeuristic { tail: Vertex, head: Vertex },
}

#[derive(Error, Debug)]
pub enum GraphReadError {
    #[error("failed to read graph file")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to decode bincode graph")]
    Bincode(#[from] bincode::Error),
    #[error("inconsistent graph: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Search(#[from] SearchError),
}
