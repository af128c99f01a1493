use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    edge::{Edge, WeightedEdge},
    Direction, Distance, EdgeId, Vertex,
};
use crate::error::{GraphReadError, SearchError};

/// Static directed graph stored as a flat edge array plus per-vertex lists of
/// edge ids.
///
/// Every id in `out_edges[v]` names an edge whose tail is `v`, every id in
/// `in_edges[v]` one whose head is `v`. Besides the topology the graph carries
/// one heuristic value per vertex. It defaults to 0 and is overwritten by
/// [`crate::search::alt::landmark::compute_heuristic`] whenever the query
/// destination changes, so a graph must not serve ALT queries for different
/// destinations at the same time.
///
/// Only the topology is serialized. A deserialized graph has to pass
/// [`Graph::validate`] before use.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    edges: Vec<Edge>,
    out_edges: Vec<Vec<EdgeId>>,
    in_edges: Vec<Vec<EdgeId>>,
    #[serde(skip)]
    heuristics: Vec<Distance>,
    #[serde(skip)]
    heuristic_destination: Option<Vertex>,
}

impl Graph {
    pub fn new(number_of_vertices: u32) -> Graph {
        let number_of_vertices = number_of_vertices as usize;
        Graph {
            edges: Vec::new(),
            out_edges: vec![Vec::new(); number_of_vertices],
            in_edges: vec![Vec::new(); number_of_vertices],
            heuristics: vec![0; number_of_vertices],
            heuristic_destination: None,
        }
    }

    pub fn from_edges(number_of_vertices: u32, edges: &[WeightedEdge]) -> Result<Graph, SearchError> {
        let mut graph = Graph::new(number_of_vertices);
        for edge in edges {
            graph.add_edge(edge.tail, edge.head, edge.weight)?;
        }
        Ok(graph)
    }

    /// Adds the edge `tail -> head` and returns its id. Ids are handed out
    /// sequentially starting at 0.
    pub fn add_edge(
        &mut self,
        tail: Vertex,
        head: Vertex,
        weight: Distance,
    ) -> Result<EdgeId, SearchError> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;

        let id = self.edges.len() as EdgeId;
        self.edges
            .push(Edge::new(id, &WeightedEdge::new(tail, head, weight)));
        self.out_edges[tail as usize].push(id);
        self.in_edges[head as usize].push(id);

        Ok(id)
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn vertices(&self) -> std::ops::Range<Vertex> {
        0..self.number_of_vertices()
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, SearchError> {
        self.edges
            .get(id as usize)
            .ok_or(SearchError::EdgeOutOfRange {
                edge: id,
                number_of_edges: self.number_of_edges(),
            })
    }

    pub fn out_edge_ids(&self, vertex: Vertex) -> Result<&[EdgeId], SearchError> {
        self.check_vertex(vertex)?;
        Ok(&self.out_edges[vertex as usize])
    }

    pub fn in_edge_ids(&self, vertex: Vertex) -> Result<&[EdgeId], SearchError> {
        self.check_vertex(vertex)?;
        Ok(&self.in_edges[vertex as usize])
    }

    pub fn out_edges(
        &self,
        vertex: Vertex,
    ) -> Result<impl ExactSizeIterator<Item = &Edge> + '_, SearchError> {
        self.edges(vertex, Direction::Forward)
    }

    pub fn in_edges(
        &self,
        vertex: Vertex,
    ) -> Result<impl ExactSizeIterator<Item = &Edge> + '_, SearchError> {
        self.edges(vertex, Direction::Backward)
    }

    /// Edges leaving `vertex` in the given search direction: outgoing edges
    /// for [`Direction::Forward`], incoming edges for [`Direction::Backward`].
    pub fn edges(
        &self,
        vertex: Vertex,
        direction: Direction,
    ) -> Result<impl ExactSizeIterator<Item = &Edge> + '_, SearchError> {
        let ids = match direction {
            Direction::Forward => self.out_edge_ids(vertex)?,
            Direction::Backward => self.in_edge_ids(vertex)?,
        };
        Ok(ids.iter().map(move |&id| &self.edges[id as usize]))
    }

    pub fn heuristic(&self, vertex: Vertex) -> Result<Distance, SearchError> {
        self.check_vertex(vertex)?;
        Ok(self.heuristics[vertex as usize])
    }

    pub fn heuristics(&self) -> &[Distance] {
        &self.heuristics
    }

    pub fn set_heuristic(&mut self, vertex: Vertex, value: Distance) -> Result<(), SearchError> {
        self.check_vertex(vertex)?;
        self.heuristics[vertex as usize] = value;
        self.heuristic_destination = None;
        Ok(())
    }

    /// Replaces the whole heuristic vector, tagging it with the destination
    /// it was computed for.
    pub(crate) fn replace_heuristics(&mut self, heuristics: Vec<Distance>, destination: Vertex) {
        debug_assert_eq!(heuristics.len(), self.heuristics.len());
        self.heuristics = heuristics;
        self.heuristic_destination = Some(destination);
    }

    pub fn reset_heuristics(&mut self) {
        self.heuristics.fill(0);
        self.heuristic_destination = None;
    }

    /// The destination the current heuristic was computed for, `None` while
    /// the heuristic is all zeros or was edited by hand.
    pub fn heuristic_destination(&self) -> Option<Vertex> {
        self.heuristic_destination
    }

    /// Returns the edges as loader-style triples, ordered by id.
    pub fn weighted_edges(&self) -> Vec<WeightedEdge> {
        self.edges
            .iter()
            .map(|edge| WeightedEdge::new(edge.tail(), edge.head(), edge.weight()))
            .collect_vec()
    }

    /// Checks the invariants `add_edge` maintains and resets the heuristic to
    /// all zeros. Edge ids must match their index, endpoints must be in range
    /// and every edge must be listed exactly once as outgoing edge of its tail
    /// and once as incoming edge of its head.
    pub fn validate(&mut self) -> Result<(), GraphReadError> {
        let number_of_vertices = self.out_edges.len();
        if self.in_edges.len() != number_of_vertices {
            return Err(GraphReadError::Inconsistent(format!(
                "{} outgoing but {} incoming adjacency lists",
                number_of_vertices,
                self.in_edges.len()
            )));
        }

        for (index, edge) in self.edges.iter().enumerate() {
            if edge.id() as usize != index {
                return Err(GraphReadError::Inconsistent(format!(
                    "edge at index {} has id {}",
                    index,
                    edge.id()
                )));
            }
            self.check_vertex(edge.tail())?;
            self.check_vertex(edge.head())?;
        }

        for direction in [Direction::Forward, Direction::Backward] {
            let lists = match direction {
                Direction::Forward => &self.out_edges,
                Direction::Backward => &self.in_edges,
            };
            let mut listed = vec![false; self.edges.len()];
            for (vertex, ids) in lists.iter().enumerate() {
                for &id in ids {
                    let edge = self.edge(id)?;
                    let endpoint = match direction {
                        Direction::Forward => edge.tail(),
                        Direction::Backward => edge.head(),
                    };
                    if endpoint as usize != vertex || std::mem::replace(&mut listed[id as usize], true) {
                        return Err(GraphReadError::Inconsistent(format!(
                            "edge {} is misplaced in the {:?} list of vertex {}",
                            id, direction, vertex
                        )));
                    }
                }
            }
            if let Some(id) = listed.iter().position(|&listed| !listed) {
                return Err(GraphReadError::Inconsistent(format!(
                    "edge {} is missing from the {:?} lists",
                    id, direction
                )));
            }
        }

        self.heuristics = vec![0; number_of_vertices];
        self.heuristic_destination = None;
        Ok(())
    }

    pub fn check_vertex(&self, vertex: Vertex) -> Result<(), SearchError> {
        if vertex >= self.number_of_vertices() {
            return Err(SearchError::VertexOutOfRange {
                vertex,
                number_of_vertices: self.number_of_vertices(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::from_edges(
            4,
            &[
                WeightedEdge::new(0, 1, 1),
                WeightedEdge::new(1, 2, 2),
                WeightedEdge::new(0, 2, 5),
                WeightedEdge::new(2, 3, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn edge_ids_are_sequential() {
        let mut graph = Graph::new(3);
        assert_eq!(graph.add_edge(0, 1, 4), Ok(0));
        assert_eq!(graph.add_edge(1, 2, 4), Ok(1));
        assert_eq!(graph.add_edge(0, 2, 9), Ok(2));
        assert_eq!(graph.edge(2).unwrap().id(), 2);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    fn adjacency_lists_match_edge_endpoints() {
        let graph = diamond();
        for vertex in graph.vertices() {
            for edge in graph.out_edges(vertex).unwrap() {
                assert_eq!(edge.tail(), vertex);
            }
            for edge in graph.in_edges(vertex).unwrap() {
                assert_eq!(edge.head(), vertex);
            }
        }
        assert_eq!(graph.out_edge_ids(0).unwrap(), &[0, 2]);
        assert_eq!(graph.in_edge_ids(2).unwrap(), &[1, 2]);
    }

    #[test]
    fn out_of_range_is_reported() {
        let mut graph = diamond();
        assert_eq!(
            graph.add_edge(0, 4, 1),
            Err(SearchError::VertexOutOfRange {
                vertex: 4,
                number_of_vertices: 4
            })
        );
        assert!(graph.out_edge_ids(7).is_err());
        assert!(graph.heuristic(4).is_err());
        assert_eq!(
            graph.edge(4).unwrap_err(),
            SearchError::EdgeOutOfRange {
                edge: 4,
                number_of_edges: 4
            }
        );
    }

    fn corrupt(out_edges: Vec<Vec<EdgeId>>, in_edges: Vec<Vec<EdgeId>>) -> Graph {
        let mut graph = diamond();
        graph.out_edges = out_edges;
        graph.in_edges = in_edges;
        graph
    }

    #[test]
    fn validate_accepts_consistent_graph() {
        let mut graph = diamond();
        graph.set_heuristic(2, 7).unwrap();
        graph.validate().unwrap();
        assert_eq!(graph.heuristics(), &[0, 0, 0, 0]);
    }

    #[test]
    fn validate_rejects_broken_adjacency() {
        let consistent = || (diamond().out_edges, diamond().in_edges);

        let (mut out_edges, in_edges) = consistent();
        out_edges[0].push(9);
        assert!(corrupt(out_edges, in_edges).validate().is_err());

        // edge 1 runs 1 -> 2, not 0 -> 2
        let (mut out_edges, in_edges) = consistent();
        out_edges[1].clear();
        out_edges[0].push(1);
        assert!(corrupt(out_edges, in_edges).validate().is_err());

        let (out_edges, mut in_edges) = consistent();
        in_edges[2].pop();
        assert!(corrupt(out_edges, in_edges).validate().is_err());

        let (mut out_edges, in_edges) = consistent();
        out_edges[0].push(0);
        assert!(corrupt(out_edges, in_edges).validate().is_err());

        let (out_edges, mut in_edges) = consistent();
        in_edges.pop();
        assert!(corrupt(out_edges, in_edges).validate().is_err());
    }

    #[test]
    fn heuristics_default_to_zero() {
        let mut graph = diamond();
        assert_eq!(graph.heuristics(), &[0, 0, 0, 0]);

        graph.set_heuristic(1, 3).unwrap();
        assert_eq!(graph.heuristic(1), Ok(3));

        graph.reset_heuristics();
        assert_eq!(graph.heuristic(1), Ok(0));
        assert_eq!(graph.heuristic_destination(), None);
    }
}
