//! Pairwise touching offsets between room shapes
//!
//! For shapes A and B, an offset `o` is valid when B centred at `o` touches A
//! centred at the origin without overlapping it. The set is found with a
//! breadth-first sweep over the grid, bounded by the Manhattan reach of both
//! shapes, and computed once per library before placement starts.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Instant;

use crate::coord::Coord;
use crate::generation::library::RoomLibrary;
use crate::room::RoomShape;

/// Manhattan radius beyond which no touching placement can exist
pub fn search_bound(a: &RoomShape, b: &RoomShape) -> i32 {
    2 * (a.extent() + b.extent() + 1)
}

/// All centre offsets at which `b` touches `a` (centred on the origin)
///
/// # Example
///
/// ```
/// use rust_dungeon_layout::{Coord, RoomShape};
/// use rust_dungeon_layout::generation::compute_offsets;
///
/// let unit = RoomShape::rectangle(1, 1).unwrap();
/// let offsets = compute_offsets(&unit, &unit);
/// assert_eq!(offsets.len(), 4);
/// assert!(offsets.contains(&Coord::new(0, -1)));
/// ```
pub fn compute_offsets(a: &RoomShape, b: &RoomShape) -> BTreeSet<Coord> {
    let bound = search_bound(a, b);
    let footprint: HashSet<Coord> = a.cells().iter().copied().collect();
    let halo = a.halo();
    // Centres inside A's footprint are sure to overlap only when B holds its own origin
    let skip_footprint = b.contains(Coord::ORIGIN);

    let mut offsets = BTreeSet::new();
    let mut visited = HashSet::from([Coord::ORIGIN]);
    let mut queue = VecDeque::from([Coord::ORIGIN]);

    // BFS from the origin dequeues in non-decreasing Manhattan order
    while let Some(current) = queue.pop_front() {
        if current.manhattan_length() > bound {
            break;
        }

        let inside = skip_footprint && footprint.contains(&current);
        if !inside && touches_at(&footprint, &halo, b, current) {
            offsets.insert(current);
        }

        for next in current.neighbors() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    offsets
}

/// Touching test against a precomputed footprint and halo of the origin shape
fn touches_at(footprint: &HashSet<Coord>, halo: &HashSet<Coord>, b: &RoomShape, centre: Coord) -> bool {
    let mut placed = b.cells().iter().map(|&offset| centre + offset);
    if placed.clone().any(|c| footprint.contains(&c)) {
        return false;
    }
    placed.any(|c| halo.contains(&c))
}

/// Touching offsets for every ordered pair of library shapes
///
/// `offsets(i, j)` holds the positions of shape `j` relative to shape `i`.
/// The table is symmetric: `offsets(j, i)` is the negation of `offsets(i, j)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    size: usize,
    entries: Vec<BTreeSet<Coord>>,
}

impl OffsetTable {
    /// Compute the table for a library
    ///
    /// Only pairs with `i <= j` are searched; the rest are derived by negation.
    pub fn build(library: &RoomLibrary) -> Self {
        let start = Instant::now();
        let size = library.len();
        let mut entries = vec![BTreeSet::new(); size * size];

        for i in 0..size {
            for j in i..size {
                let forward = compute_offsets(&library.shapes()[i], &library.shapes()[j]);
                if i != j {
                    entries[j * size + i] = forward.iter().map(|o| o.inverse()).collect();
                }
                entries[i * size + j] = forward;
            }
        }

        log::debug!(
            "Generated room offsets for {} shapes in {:?}",
            size,
            start.elapsed()
        );

        Self { size, entries }
    }

    /// Number of shapes the table covers
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Offsets of shape `to` relative to shape `from`
    ///
    /// Returns `None` if either index is out of range.
    pub fn offsets(&self, from: usize, to: usize) -> Option<&BTreeSet<Coord>> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.entries.get(from * self.size + to)
    }
}
