use crate::{
    error::SearchError,
    graphs::{Distance, Vertex, INFINITY},
};

/// Branching factor used by the searches unless the caller asks for another.
pub const DEFAULT_ARITY: usize = 4;

#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    vertex: Vertex,
    distance: Distance,
}

/// An indexed d-ary min-heap over the fixed vertex set `0..n`, keyed by the
/// tentative distance of each vertex.
///
/// All `n` entries live in one dense array. The first `len` slots form the
/// heap of *active* vertices (the wavefront of a search); the remaining slots
/// hold the inactive ones in no particular order. `positions` maps every
/// vertex to its slot, so any vertex can be found and re-keyed in
/// O(log_D n). Both arrays are kept in sync on every swap.
///
/// Ties between equal distances are broken by whatever order the heap happens
/// to be in.
#[derive(Clone, Debug)]
pub struct IndexedDaryHeap<const D: usize = DEFAULT_ARITY> {
    entries: Vec<HeapEntry>,
    positions: Vec<usize>,
    len: usize,
}

impl<const D: usize> IndexedDaryHeap<D> {
    const VALID_ARITY: () = assert!(D >= 2, "a d-ary heap needs at least two children per node");

    /// Creates a heap for `number_of_vertices` vertices, all inactive and at
    /// distance [`INFINITY`].
    pub fn new(number_of_vertices: u32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_ARITY;

        let entries = (0..number_of_vertices)
            .map(|vertex| HeapEntry {
                vertex,
                distance: INFINITY,
            })
            .collect();
        IndexedDaryHeap {
            entries,
            positions: (0..number_of_vertices as usize).collect(),
            len: 0,
        }
    }

    /// Number of active vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no vertex is active.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current tentative distance of `vertex`, [`INFINITY`] if it was never set.
    pub fn distance(&self, vertex: Vertex) -> Result<Distance, SearchError> {
        let position = self.position(vertex)?;
        Ok(self.entries[position].distance)
    }

    /// Returns true if `vertex` is currently part of the heap.
    pub fn is_active(&self, vertex: Vertex) -> Result<bool, SearchError> {
        Ok(self.position(vertex)? < self.len)
    }

    /// Inserts `vertex` into the heap with its current distance. Returns false
    /// if it already was active.
    pub fn make_active(&mut self, vertex: Vertex) -> Result<bool, SearchError> {
        let position = self.position(vertex)?;
        if position < self.len {
            return Ok(false);
        }

        self.swap(position, self.len);
        self.len += 1;
        self.sift_up(self.len - 1);
        Ok(true)
    }

    /// Removes `vertex` from the heap, keeping its distance. Returns false if
    /// it was not active.
    pub fn make_inactive(&mut self, vertex: Vertex) -> Result<bool, SearchError> {
        let position = self.position(vertex)?;
        if position >= self.len {
            return Ok(false);
        }

        let last = self.len - 1;
        self.swap(position, last);
        self.len -= 1;
        if position < self.len {
            self.sift_up(position);
            self.sift_down(position);
        }
        Ok(true)
    }

    /// Changes the key of `vertex` and restores the heap order if it is active.
    ///
    /// The searches only ever lower a distance, which moves the vertex toward
    /// the root. Raising one is handled as well and moves it toward the leaves.
    pub fn set_distance(&mut self, vertex: Vertex, distance: Distance) -> Result<(), SearchError> {
        let position = self.position(vertex)?;
        let previous = std::mem::replace(&mut self.entries[position].distance, distance);

        if position < self.len {
            if distance < previous {
                self.sift_up(position);
            } else if distance > previous {
                self.sift_down(position);
            }
        }
        Ok(())
    }

    /// The active vertex with the smallest distance, without removing it.
    pub fn peek_min(&self) -> Option<Vertex> {
        if self.is_empty() {
            return None;
        }
        Some(self.entries[0].vertex)
    }

    /// Removes and returns the active vertex with the smallest distance. Its
    /// distance stays readable through [`Self::distance`].
    pub fn remove_min(&mut self) -> Option<Vertex> {
        if self.is_empty() {
            return None;
        }

        let min = self.entries[0].vertex;
        let last = self.len - 1;
        self.swap(0, last);
        self.len -= 1;
        self.sift_down(0);
        Some(min)
    }

    fn position(&self, vertex: Vertex) -> Result<usize, SearchError> {
        self.positions
            .get(vertex as usize)
            .copied()
            .ok_or(SearchError::VertexOutOfRange {
                vertex,
                number_of_vertices: self.positions.len() as u32,
            })
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions[self.entries[a].vertex as usize] = a;
        self.positions[self.entries[b].vertex as usize] = b;
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / D;
            if self.entries[position].distance >= self.entries[parent].distance {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let first_child = position * D + 1;
            if first_child >= self.len {
                break;
            }
            let last_child = std::cmp::min(first_child + D, self.len);

            let mut smallest = position;
            for child in first_child..last_child {
                if self.entries[child].distance < self.entries[smallest].distance {
                    smallest = child;
                }
            }

            if smallest == position {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn is_heap<const D: usize>(heap: &IndexedDaryHeap<D>) -> bool {
        (1..heap.len).all(|position| {
            heap.entries[(position - 1) / D].distance <= heap.entries[position].distance
        })
    }

    fn positions_in_sync<const D: usize>(heap: &IndexedDaryHeap<D>) -> bool {
        heap.entries
            .iter()
            .enumerate()
            .all(|(slot, entry)| heap.positions[entry.vertex as usize] == slot)
    }

    #[test]
    fn new_heap_is_empty_and_infinite() {
        let heap = IndexedDaryHeap::<4>::new(5);
        assert!(heap.is_empty());
        assert_eq!(heap.peek_min(), None);
        for vertex in 0..5 {
            assert_eq!(heap.distance(vertex), Ok(INFINITY));
            assert_eq!(heap.is_active(vertex), Ok(false));
        }
    }

    #[test]
    fn test_empty_remove_min() {
        let mut heap = IndexedDaryHeap::<2>::new(3);
        assert_eq!(heap.remove_min(), None);
    }

    #[test]
    fn make_active_reports_state_change() {
        let mut heap = IndexedDaryHeap::<3>::new(4);
        assert_eq!(heap.make_active(2), Ok(true));
        assert_eq!(heap.make_active(2), Ok(false));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.make_inactive(2), Ok(true));
        assert_eq!(heap.make_inactive(2), Ok(false));
        assert!(heap.is_empty());
    }

    #[test]
    fn out_of_range_vertex_is_an_error() {
        let mut heap = IndexedDaryHeap::<4>::new(3);
        let error = SearchError::VertexOutOfRange {
            vertex: 3,
            number_of_vertices: 3,
        };
        assert_eq!(heap.distance(3), Err(error.clone()));
        assert_eq!(heap.is_active(3), Err(error.clone()));
        assert_eq!(heap.make_active(3), Err(error.clone()));
        assert_eq!(heap.make_inactive(3), Err(error.clone()));
        assert_eq!(heap.set_distance(3, 1), Err(error));
    }

    #[test]
    fn test_remove_min_order() {
        let mut heap = IndexedDaryHeap::<2>::new(4);
        for (vertex, distance) in [(0, 5), (1, 3), (2, 4), (3, 9)] {
            heap.make_active(vertex).unwrap();
            heap.set_distance(vertex, distance).unwrap();
        }

        assert_eq!(heap.peek_min(), Some(1));
        assert_eq!(heap.remove_min(), Some(1));
        assert_eq!(heap.remove_min(), Some(2));
        assert_eq!(heap.remove_min(), Some(0));
        assert_eq!(heap.remove_min(), Some(3));
        assert_eq!(heap.remove_min(), None);

        // distances survive removal
        assert_eq!(heap.distance(0), Ok(5));
        assert_eq!(heap.is_active(0), Ok(false));
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = IndexedDaryHeap::<4>::new(6);
        for vertex in 0..6 {
            heap.make_active(vertex).unwrap();
            heap.set_distance(vertex, 10 + vertex as Distance).unwrap();
        }

        heap.set_distance(5, 1).unwrap();
        assert_eq!(heap.remove_min(), Some(5));
        heap.set_distance(3, 2).unwrap();
        assert_eq!(heap.remove_min(), Some(3));
        assert_eq!(heap.remove_min(), Some(0));
    }

    #[test]
    fn test_increase_key() {
        let mut heap = IndexedDaryHeap::<2>::new(3);
        for vertex in 0..3 {
            heap.make_active(vertex).unwrap();
            heap.set_distance(vertex, vertex as Distance).unwrap();
        }

        heap.set_distance(0, 7).unwrap();
        assert_eq!(heap.remove_min(), Some(1));
        assert_eq!(heap.remove_min(), Some(2));
        assert_eq!(heap.remove_min(), Some(0));
    }

    #[test]
    fn inactive_distance_is_applied_on_activation() {
        let mut heap = IndexedDaryHeap::<4>::new(3);
        heap.make_active(0).unwrap();
        heap.set_distance(0, 8).unwrap();

        heap.set_distance(2, 1).unwrap();
        assert_eq!(heap.peek_min(), Some(0));

        heap.make_active(2).unwrap();
        assert_eq!(heap.peek_min(), Some(2));
    }

    #[test]
    fn make_inactive_keeps_heap_order() {
        let mut heap = IndexedDaryHeap::<2>::new(7);
        for (vertex, distance) in [(0, 1), (1, 6), (2, 2), (3, 7), (4, 8), (5, 3), (6, 4)] {
            heap.make_active(vertex).unwrap();
            heap.set_distance(vertex, distance).unwrap();
        }

        heap.make_inactive(1).unwrap();
        assert!(is_heap(&heap));
        assert!(positions_in_sync(&heap));

        let order: Vec<_> = std::iter::from_fn(|| heap.remove_min()).collect();
        assert_eq!(order, vec![0, 2, 5, 6, 3, 4]);
    }

    fn extracted_distances_are_sorted<const D: usize>(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let number_of_vertices = 200;
        let mut heap = IndexedDaryHeap::<D>::new(number_of_vertices);

        let mut extracted: Vec<Distance> = Vec::new();
        for _ in 0..2_000 {
            let vertex = rng.gen_range(0..number_of_vertices);
            if rng.gen_bool(0.7) {
                // keys never drop below the last extracted one, as in a search
                let floor = extracted.last().copied().unwrap_or(0);
                let distance = floor + rng.gen_range(0..1_000);
                if distance < heap.distance(vertex).unwrap() {
                    heap.make_active(vertex).unwrap();
                    heap.set_distance(vertex, distance).unwrap();
                }
            } else if let Some(min) = heap.remove_min() {
                extracted.push(heap.distance(min).unwrap());
            }
            assert!(is_heap(&heap));
            assert!(positions_in_sync(&heap));
        }

        assert!(!extracted.is_empty());
        assert!(extracted.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn random_operations_keep_heap_property() {
        for seed in 0..5 {
            extracted_distances_are_sorted::<2>(seed);
            extracted_distances_are_sorted::<3>(seed);
            extracted_distances_are_sorted::<4>(seed);
            extracted_distances_are_sorted::<8>(seed);
        }
    }
}
