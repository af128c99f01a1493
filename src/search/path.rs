use serde::{Deserialize, Serialize};

use crate::graphs::{Distance, Vertex};

/// Represents a request for the shortest path distance from `source` to
/// `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: Vertex,
    pub target: Vertex,
}

/// Outcome of one timed query. `distance` is `None` if no path exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTimingResult {
    pub request: ShortestPathRequest,
    pub distance: Option<Distance>,
    pub dijkstra_seconds: f64,
    pub alt_seconds: f64,
}
