use tracing::debug;

use super::collections::dary_heap::IndexedDaryHeap;
use crate::{
    error::SearchError,
    graphs::{Direction, Distance, Graph, Vertex, INFINITY},
};

/// Distances from `source` to every vertex, [`INFINITY`] for the unreachable
/// ones.
///
/// Edge weights must be non-negative, which the unsigned [`Distance`] type
/// already enforces.
pub fn dijkstra_one_to_all<const D: usize>(
    graph: &Graph,
    source: Vertex,
) -> Result<Vec<Distance>, SearchError> {
    single_source::<D>(graph, source, Direction::Forward)
}

/// Runs Dijkstra from `source` until every reachable vertex is settled.
///
/// With [`Direction::Backward`] the search follows edges against their
/// orientation, so entry `v` of the result is the distance from `v` to
/// `source`.
pub fn single_source<const D: usize>(
    graph: &Graph,
    source: Vertex,
    direction: Direction,
) -> Result<Vec<Distance>, SearchError> {
    let mut distances = vec![INFINITY; graph.number_of_vertices() as usize];
    let mut heap = IndexedDaryHeap::<D>::new(graph.number_of_vertices());

    heap.make_active(source)?;
    heap.set_distance(source, 0)?;

    while let Some(tail) = heap.remove_min() {
        // once removed a vertex never re-enters the heap, its distance is final
        let distance_tail = heap.distance(tail)?;
        distances[tail as usize] = distance_tail;

        for edge in graph.edges(tail, direction)? {
            let head = direction.next_vertex(edge);
            let alternative_distance_head = distance_tail.saturating_add(edge.weight());
            if alternative_distance_head < heap.distance(head)? {
                heap.make_active(head)?;
                heap.set_distance(head, alternative_distance_head)?;
            }
        }
    }

    Ok(distances)
}

/// Distance from `source` to `target`. Stops as soon as `target` is settled.
pub fn dijkstra_one_to_one<const D: usize>(
    graph: &Graph,
    source: Vertex,
    target: Vertex,
) -> Result<Distance, SearchError> {
    let (distance, _) = one_to_one_with_settled::<D>(graph, source, target)?;
    Ok(distance)
}

/// [`dijkstra_one_to_one`] that also returns how many vertices were settled.
pub(crate) fn one_to_one_with_settled<const D: usize>(
    graph: &Graph,
    source: Vertex,
    target: Vertex,
) -> Result<(Distance, usize), SearchError> {
    graph.check_vertex(target)?;
    let mut heap = IndexedDaryHeap::<D>::new(graph.number_of_vertices());

    heap.make_active(source)?;
    heap.set_distance(source, 0)?;

    let mut settled = 0;
    while let Some(tail) = heap.remove_min() {
        settled += 1;
        let distance_tail = heap.distance(tail)?;
        if tail == target {
            debug!(source, target, settled, "dijkstra query finished");
            return Ok((distance_tail, settled));
        }

        for edge in graph.out_edges(tail)? {
            let alternative_distance_head = distance_tail.saturating_add(edge.weight());
            if alternative_distance_head < heap.distance(edge.head())? {
                heap.make_active(edge.head())?;
                heap.set_distance(edge.head(), alternative_distance_head)?;
            }
        }
    }

    debug!(source, target, settled, "dijkstra query found no path");
    Ok((INFINITY, settled))
}
