use serde::{Deserialize, Serialize};

use super::{Distance, EdgeId, Vertex};

/// An edge as handed over by a loader, before the graph assigned it an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub tail: Vertex,
    pub head: Vertex,
    pub weight: Distance,
}

impl WeightedEdge {
    pub fn new(tail: Vertex, head: Vertex, weight: Distance) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

/// An edge owned by a [`super::Graph`]. Edges are immutable once added, their
/// id is their index in the graph's edge array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    tail: Vertex,
    head: Vertex,
    weight: Distance,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, edge: &WeightedEdge) -> Edge {
        Edge {
            id,
            tail: edge.tail,
            head: edge.head,
            weight: edge.weight,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The vertex the edge leaves.
    pub fn tail(&self) -> Vertex {
        self.tail
    }

    /// The vertex the edge enters.
    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Distance {
        self.weight
    }
}
