use tracing::debug;

use crate::{
    error::SearchError,
    graphs::{Distance, Graph, Vertex, INFINITY},
    search::collections::dary_heap::IndexedDaryHeap,
};

/// Shortest path distance from `source` to `destination` using the heuristic
/// stored in `graph`.
///
/// The heuristic has to be prepared for `destination` with
/// [`super::landmark::compute_heuristic`] first. A graph whose heuristic was
/// never computed answers like plain Dijkstra.
pub fn alt<const D: usize>(
    graph: &Graph,
    source: Vertex,
    destination: Vertex,
) -> Result<Distance, SearchError> {
    if let Some(prepared) = graph.heuristic_destination() {
        if prepared != destination {
            return Err(SearchError::HeuristicDestinationMismatch {
                prepared,
                requested: destination,
            });
        }
    }

    alt_with_heuristic::<D>(graph, graph.heuristics(), source, destination)
}

/// ALT query with a caller owned heuristic, e.g. one per concurrent query.
///
/// `heuristic[v]` must be a consistent lower bound on the distance from `v`
/// to `destination`; [`INFINITY`] marks vertices that cannot reach it. The
/// search runs Dijkstra on the reduced weights `w + h(head) - h(tail)`, which
/// are non-negative for a consistent heuristic, and stops once `destination`
/// is settled.
pub fn alt_with_heuristic<const D: usize>(
    graph: &Graph,
    heuristic: &[Distance],
    source: Vertex,
    destination: Vertex,
) -> Result<Distance, SearchError> {
    let (distance, _) = alt_with_settled::<D>(graph, heuristic, source, destination)?;
    Ok(distance)
}

/// [`alt_with_heuristic`] that also returns how many vertices were settled.
pub(crate) fn alt_with_settled<const D: usize>(
    graph: &Graph,
    heuristic: &[Distance],
    source: Vertex,
    destination: Vertex,
) -> Result<(Distance, usize), SearchError> {
    graph.check_vertex(source)?;
    graph.check_vertex(destination)?;
    if heuristic.len() != graph.number_of_vertices() as usize {
        return Err(SearchError::HeuristicLength {
            expected: graph.number_of_vertices(),
            found: heuristic.len(),
        });
    }

    if source == destination {
        return Ok((0, 0));
    }
    let heuristic_source = heuristic[source as usize];
    if heuristic_source == INFINITY {
        return Ok((INFINITY, 0));
    }

    let mut heap = IndexedDaryHeap::<D>::new(graph.number_of_vertices());
    heap.make_active(source)?;
    heap.set_distance(source, 0)?;

    let mut settled = 0;
    while let Some(tail) = heap.remove_min() {
        settled += 1;
        let reduced_distance_tail = heap.distance(tail)?;

        if tail == destination {
            debug!(source, destination, settled, "alt query finished");
            let distance = reduced_distance_tail
                .saturating_add(heuristic_source)
                .saturating_sub(heuristic[destination as usize]);
            return Ok((distance, settled));
        }

        let heuristic_tail = heuristic[tail as usize];
        for edge in graph.out_edges(tail)? {
            let head = edge.head();
            let heuristic_head = heuristic[head as usize];
            if heuristic_head == INFINITY {
                continue;
            }

            let reduced_weight = edge
                .weight()
                .saturating_add(heuristic_head)
                .checked_sub(heuristic_tail)
                .ok_or(SearchError::InconsistentHeuristic { tail, head })?;
            let alternative_distance_head = reduced_distance_tail.saturating_add(reduced_weight);
            if alternative_distance_head < heap.distance(head)? {
                heap.make_active(head)?;
                heap.set_distance(head, alternative_distance_head)?;
            }
        }
    }

    // unreachable, the sentinel is returned without adjustment
    debug!(source, destination, settled, "alt query found no path");
    Ok((INFINITY, settled))
}
