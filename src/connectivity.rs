//! Walls, room adjacency and passages
//!
//! Every edge between a room cell and a cell outside that room is a wall
//! segment. Segments separating two different rooms are grouped by room pair,
//! and one segment per pair is removed from the wall set to form a passage.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::Rng;

use crate::coord::{Coord, CoordPair};
use crate::generation::Layout;

/// Room indices ordered `(lower, higher)`
pub type RoomPair = (usize, usize);

/// Wall segments and passages derived from a finished layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connectivity {
    walls: BTreeSet<CoordPair>,
    adjacency: BTreeMap<RoomPair, BTreeSet<CoordPair>>,
    passages: BTreeMap<RoomPair, CoordPair>,
    passage_segments: BTreeSet<CoordPair>,
}

impl Connectivity {
    /// Derive walls and carve one passage per touching room pair
    pub fn extract<R: Rng + ?Sized>(layout: &Layout, rng: &mut R) -> Self {
        let owners = layout.cell_owners();
        Self::extract_with_owners(layout, &owners, rng)
    }

    /// Same as [`Connectivity::extract`] with a prebuilt cell ownership map
    pub fn extract_with_owners<R: Rng + ?Sized>(
        layout: &Layout,
        owners: &HashMap<Coord, usize>,
        rng: &mut R,
    ) -> Self {
        let mut connectivity = Self::boundaries(layout, owners);
        connectivity.carve_passages(rng);

        log::info!(
            "Extracted {} wall segments and {} passages",
            connectivity.walls.len(),
            connectivity.passages.len()
        );
        connectivity
    }

    /// Walls and adjacency buckets, before any passage is carved
    fn boundaries(layout: &Layout, owners: &HashMap<Coord, usize>) -> Self {
        let mut walls = BTreeSet::new();
        let mut adjacency: BTreeMap<RoomPair, BTreeSet<CoordPair>> = BTreeMap::new();

        for (index, room) in layout.rooms().iter().enumerate() {
            for cell in room.cells() {
                for neighbor in cell.neighbors() {
                    if room.contains(neighbor) {
                        continue;
                    }

                    let segment = CoordPair::new(cell, neighbor);
                    walls.insert(segment);

                    if let Some(&other) = owners.get(&neighbor) {
                        let pair = (index.min(other), index.max(other));
                        adjacency.entry(pair).or_default().insert(segment);
                    }
                }
            }
        }

        Self {
            walls,
            adjacency,
            passages: BTreeMap::new(),
            passage_segments: BTreeSet::new(),
        }
    }

    fn carve_passages<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (&pair, segments) in &self.adjacency {
            let pick = rng.gen_range(0..segments.len());
            if let Some(&segment) = segments.iter().nth(pick) {
                self.walls.remove(&segment);
                self.passages.insert(pair, segment);
                self.passage_segments.insert(segment);
            }
        }
    }

    /// Remaining wall segments, passages excluded
    #[inline]
    pub fn walls(&self) -> &BTreeSet<CoordPair> {
        &self.walls
    }

    /// The single passage of every connected room pair
    #[inline]
    pub fn passages(&self) -> &BTreeMap<RoomPair, CoordPair> {
        &self.passages
    }

    /// All boundary segments shared by each touching room pair
    #[inline]
    pub fn adjacency(&self) -> &BTreeMap<RoomPair, BTreeSet<CoordPair>> {
        &self.adjacency
    }

    pub fn is_wall(&self, segment: &CoordPair) -> bool {
        self.walls.contains(segment)
    }

    /// Every carved passage segment, ordered
    #[inline]
    pub fn passage_segments(&self) -> &BTreeSet<CoordPair> {
        &self.passage_segments
    }

    pub fn is_passage(&self, segment: &CoordPair) -> bool {
        self.passage_segments.contains(segment)
    }

    /// Neighbor lists of the room graph (rooms joined by a passage)
    pub fn room_graph(&self, room_count: usize) -> Vec<Vec<usize>> {
        let mut graph = vec![Vec::new(); room_count];
        for &(a, b) in self.passages.keys() {
            if a < room_count && b < room_count {
                graph[a].push(b);
                graph[b].push(a);
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{LayoutBuilder, OffsetTable, RoomLibrary, UniformPlacement};
    use crate::room::RoomShape;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_units() -> Layout {
        let library = RoomLibrary::from_shapes(vec![RoomShape::rectangle(1, 1).unwrap()]).unwrap();
        let table = OffsetTable::build(&library);
        let mut builder = LayoutBuilder::new(&library, &table).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        builder.place_shape(0, &UniformPlacement, &mut rng).unwrap();
        builder.finish()
    }

    fn random_layout(seed: u64, rooms: usize) -> Layout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let library = RoomLibrary::rectangles(1, 4, 12, &mut rng).unwrap();
        let table = OffsetTable::build(&library);
        LayoutBuilder::new(&library, &table)
            .unwrap()
            .fill(rooms, &UniformPlacement, 16, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_two_single_cells() {
        let layout = two_units();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let connectivity = Connectivity::extract(&layout, &mut rng);

        // 4 + 4 edges, the shared one counted once, then removed as a passage
        assert_eq!(connectivity.adjacency().len(), 1);
        assert_eq!(connectivity.passages().len(), 1);
        assert_eq!(connectivity.walls().len(), 6);

        let shared = CoordPair::new(layout.rooms()[0].centre, layout.rooms()[1].centre);
        assert_eq!(connectivity.passages().get(&(0, 1)), Some(&shared));
        assert!(connectivity.is_passage(&shared));
        assert!(!connectivity.is_wall(&shared));
    }

    #[test]
    fn test_single_room_is_all_wall() {
        let library = RoomLibrary::from_shapes(vec![RoomShape::rectangle(2, 3).unwrap()]).unwrap();
        let table = OffsetTable::build(&library);
        let layout = LayoutBuilder::new(&library, &table).unwrap().finish();
        let connectivity = Connectivity::extract(&layout, &mut ChaCha8Rng::seed_from_u64(0));

        // Perimeter of a 2x3 rectangle
        assert_eq!(connectivity.walls().len(), 10);
        assert!(connectivity.passages().is_empty());
        assert!(connectivity.walls().iter().all(|w| w.is_edge()));
    }

    #[test]
    fn test_one_passage_per_touching_pair() {
        let layout = random_layout(21, 20);
        let connectivity = Connectivity::extract(&layout, &mut ChaCha8Rng::seed_from_u64(2));

        let rooms = layout.rooms();
        let mut touching = BTreeSet::new();
        for i in 0..rooms.len() {
            for j in i + 1..rooms.len() {
                if rooms[i].touches(&rooms[j]) {
                    touching.insert((i, j));
                }
            }
        }

        let buckets: BTreeSet<RoomPair> = connectivity.adjacency().keys().copied().collect();
        let passages: BTreeSet<RoomPair> = connectivity.passages().keys().copied().collect();
        assert_eq!(buckets, touching);
        assert_eq!(passages, touching);

        for (pair, segment) in connectivity.passages() {
            assert!(connectivity.adjacency()[pair].contains(segment));
            assert!(!connectivity.is_wall(segment));
            assert!(connectivity.is_passage(segment));
        }
        assert_eq!(connectivity.passage_segments().len(), connectivity.passages().len());
        for segment in connectivity.walls() {
            assert!(!connectivity.is_passage(segment));
        }
    }

    #[test]
    fn test_walls_cover_every_room_edge() {
        let layout = random_layout(8, 10);
        let connectivity = Connectivity::extract(&layout, &mut ChaCha8Rng::seed_from_u64(8));

        let boundary_total: usize = connectivity.adjacency().values().map(|s| s.len()).sum();
        let mut all = connectivity.walls().clone();
        all.extend(connectivity.passages().values().copied());

        for room in layout.rooms() {
            for cell in room.cells() {
                for n in cell.neighbors() {
                    if !room.contains(n) {
                        assert!(all.contains(&CoordPair::new(cell, n)));
                    }
                }
            }
        }
        assert!(boundary_total >= connectivity.passages().len());
    }

    #[test]
    fn test_room_graph() {
        let layout = random_layout(3, 6);
        let connectivity = Connectivity::extract(&layout, &mut ChaCha8Rng::seed_from_u64(3));
        let graph = connectivity.room_graph(layout.len());

        assert_eq!(graph.len(), 6);
        for (room, neighbors) in graph.iter().enumerate() {
            for &n in neighbors {
                assert!(graph[n].contains(&room));
            }
        }
        // Every room after the first touches an earlier one
        for room in 1..graph.len() {
            assert!(graph[room].iter().any(|&n| n < room));
        }
    }
}
