#![allow(dead_code)]

use alt_paths::graphs::{edge::WeightedEdge, Distance, Graph};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The four vertex example: 0 -> 1 (1), 1 -> 2 (2), 0 -> 2 (5), 2 -> 3 (1).
pub fn small_graph() -> Graph {
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

/// Random directed graph, zero weights and parallel edges included.
pub fn random_graph(seed: u64, number_of_vertices: u32, number_of_edges: u32) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<_> = (0..number_of_edges)
        .map(|_| {
            WeightedEdge::new(
                rng.gen_range(0..number_of_vertices),
                rng.gen_range(0..number_of_vertices),
                rng.gen_range(0..100),
            )
        })
        .collect();
    Graph::from_edges(number_of_vertices, &edges).unwrap()
}

/// Random graph where every edge also exists in the opposite direction with
/// the same weight, like most road networks.
pub fn random_symmetric_graph(seed: u64, number_of_vertices: u32, number_of_edges: u32) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for _ in 0..number_of_edges {
        let edge = WeightedEdge::new(
            rng.gen_range(0..number_of_vertices),
            rng.gen_range(0..number_of_vertices),
            rng.gen_range(1..100),
        );
        edges.push(edge);
        edges.push(edge.reversed());
    }
    Graph::from_edges(number_of_vertices, &edges).unwrap()
}

/// Bellman-Ford style reference distances.
pub fn reference_distances(graph: &Graph, source: u32) -> Vec<Distance> {
    let mut distances = vec![Distance::MAX; graph.number_of_vertices() as usize];
    distances[source as usize] = 0;
    let edges = graph.weighted_edges();
    loop {
        let mut changed = false;
        for edge in edges.iter() {
            let tail_distance = distances[edge.tail as usize];
            if tail_distance == Distance::MAX {
                continue;
            }
            if tail_distance + edge.weight < distances[edge.head as usize] {
                distances[edge.head as usize] = tail_distance + edge.weight;
                changed = true;
            }
        }
        if !changed {
            return distances;
        }
    }
}
