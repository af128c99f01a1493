use ahash::{HashSet, HashSetExt};
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rand::Rng;
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use crate::{
    error::SearchError,
    graphs::{Direction, Distance, Graph, Vertex, INFINITY},
    search::{collections::dary_heap::DEFAULT_ARITY, dijkstra::single_source},
    utility::get_progressbar,
};

/// A landmark vertex together with its distances to and from every vertex.
#[derive(Clone, Debug)]
pub struct Landmark {
    pub vertex: Vertex,
    /// `distances[v]` is the distance from the landmark to `v`.
    pub distances: Vec<Distance>,
    /// `reverse_distances[v]` is the distance from `v` to the landmark.
    pub reverse_distances: Vec<Distance>,
}

impl Landmark {
    pub fn new(graph: &Graph, vertex: Vertex) -> Result<Landmark, SearchError> {
        Ok(Landmark {
            vertex,
            distances: single_source::<DEFAULT_ARITY>(graph, vertex, Direction::Forward)?,
            reverse_distances: single_source::<DEFAULT_ARITY>(graph, vertex, Direction::Backward)?,
        })
    }

    /// Lower bound on the distance from `vertex` to `destination`.
    ///
    /// By the triangle inequality `d(v, t) >= d(L, t) - d(L, v)` and
    /// `d(v, t) >= d(v, L) - d(t, L)`. On graphs with symmetric distances both
    /// terms together are `|d(L, t) - d(L, v)|`. [`INFINITY`] means the
    /// landmark proves that `destination` cannot be reached from `vertex`.
    pub fn lower_bound(&self, vertex: Vertex, destination: Vertex) -> Result<Distance, SearchError> {
        let number_of_vertices = self.distances.len();
        if self.reverse_distances.len() != number_of_vertices {
            return Err(SearchError::LandmarkMismatch {
                vertex: self.vertex,
                expected: number_of_vertices as u32,
                found: self.reverse_distances.len(),
            });
        }
        for checked in [vertex, destination] {
            if checked as usize >= number_of_vertices {
                return Err(SearchError::VertexOutOfRange {
                    vertex: checked,
                    number_of_vertices: number_of_vertices as u32,
                });
            }
        }
        let (vertex, destination) = (vertex as usize, destination as usize);

        let forward = potential_difference(self.distances[destination], self.distances[vertex]);
        let backward = potential_difference(
            self.reverse_distances[vertex],
            self.reverse_distances[destination],
        );

        Ok(std::cmp::max(forward, backward))
    }
}

fn potential_difference(minuend: Distance, subtrahend: Distance) -> Distance {
    match (minuend, subtrahend) {
        // nothing is known about vertices the landmark does not connect to
        (_, INFINITY) => 0,
        // the landmark reaches one side but not the other: no path exists
        (INFINITY, _) => INFINITY,
        _ => minuend.saturating_sub(subtrahend),
    }
}

#[derive(Clone, Debug, Default)]
pub struct Landmarks {
    pub landmarks: Vec<Landmark>,
}

impl Landmarks {
    /// Builds one landmark per given vertex. The single source searches run in
    /// parallel.
    pub fn new(graph: &Graph, vertices: &[Vertex]) -> Result<Landmarks, SearchError> {
        let mut seen = HashSet::new();
        for &vertex in vertices {
            graph.check_vertex(vertex)?;
            if !seen.insert(vertex) {
                return Err(SearchError::DuplicateLandmark { vertex });
            }
        }

        info!(
            number_of_landmarks = vertices.len(),
            "Start landmark preprocessing"
        );
        let landmarks = vertices
            .par_iter()
            .progress_with(get_progressbar(
                "Generating landmarks",
                vertices.len() as u64,
            ))
            .map(|&vertex| Landmark::new(graph, vertex))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Finished landmark preprocessing");

        Ok(Landmarks { landmarks })
    }

    /// Picks `number_of_landmarks` distinct vertices uniformly at random,
    /// drawing again whenever a vertex was already picked.
    pub fn random<R: Rng + ?Sized>(
        graph: &Graph,
        number_of_landmarks: u32,
        rng: &mut R,
    ) -> Result<Landmarks, SearchError> {
        if number_of_landmarks > graph.number_of_vertices() {
            return Err(SearchError::NotEnoughVertices {
                requested: number_of_landmarks,
                available: graph.number_of_vertices(),
            });
        }

        let mut picked = HashSet::new();
        let mut vertices = Vec::with_capacity(number_of_landmarks as usize);
        while vertices.len() < number_of_landmarks as usize {
            let vertex = rng.gen_range(graph.vertices());
            if picked.insert(vertex) {
                vertices.push(vertex);
            }
        }
        debug!(?vertices, "picked landmarks");

        Landmarks::new(graph, &vertices)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.landmarks
            .iter()
            .map(|landmark| landmark.vertex)
            .collect_vec()
    }

    /// Best lower bound any landmark gives for the distance from `vertex` to
    /// `destination`, 0 without landmarks.
    pub fn lower_bound(&self, vertex: Vertex, destination: Vertex) -> Result<Distance, SearchError> {
        self.landmarks.iter().try_fold(0, |best, landmark| {
            Ok(std::cmp::max(best, landmark.lower_bound(vertex, destination)?))
        })
    }

    /// Lower bounds from every vertex of `graph` to `destination`.
    pub fn heuristic(
        &self,
        graph: &Graph,
        destination: Vertex,
    ) -> Result<Vec<Distance>, SearchError> {
        graph.check_vertex(destination)?;
        let number_of_vertices = graph.number_of_vertices();
        for landmark in self.landmarks.iter() {
            for found in [landmark.distances.len(), landmark.reverse_distances.len()] {
                if found != number_of_vertices as usize {
                    return Err(SearchError::LandmarkMismatch {
                        vertex: landmark.vertex,
                        expected: number_of_vertices,
                        found,
                    });
                }
            }
        }

        graph
            .vertices()
            .into_par_iter()
            .map(|vertex| self.lower_bound(vertex, destination))
            .collect()
    }
}

/// Samples `number_of_landmarks` distinct landmarks and runs their single
/// source searches.
pub fn select_landmarks<R: Rng + ?Sized>(
    graph: &Graph,
    number_of_landmarks: u32,
    rng: &mut R,
) -> Result<Landmarks, SearchError> {
    Landmarks::random(graph, number_of_landmarks, rng)
}

/// Overwrites the heuristic stored in `graph` with lower bounds to
/// `destination`. Values left from an earlier destination are discarded.
pub fn compute_heuristic(
    graph: &mut Graph,
    landmarks: &Landmarks,
    destination: Vertex,
) -> Result<(), SearchError> {
    let heuristics = landmarks.heuristic(graph, destination)?;
    graph.replace_heuristics(heuristics, destination);
    Ok(())
}
