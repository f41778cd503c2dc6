//! Incremental room placement
//!
//! The layout starts with library shape 0 at the origin. Each further room
//! picks a random shape, gathers every centre where it touches some placed
//! room (from the [`OffsetTable`]) without covering an already used cell, and
//! commits one of them as chosen by a [`PlacementPolicy`]. Placed rooms are
//! never moved or removed.

use std::collections::{BTreeSet, HashMap, HashSet};

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::coord::Coord;
use crate::error::{DungeonError, Result};
use crate::generation::library::RoomLibrary;
use crate::generation::offsets::OffsetTable;
use crate::room::RoomInstance;

/// Library index of the room fixed at the origin
pub const START_SHAPE_INDEX: usize = 0;

/// Strategy for picking one centre out of the legal candidates
pub trait PlacementPolicy {
    /// Choose a centre; `None` only when `candidates` is empty
    fn choose(&self, candidates: &[Coord], rng: &mut dyn RngCore) -> Option<Coord>;
}

/// Every legal centre is equally likely
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPlacement;

impl PlacementPolicy for UniformPlacement {
    fn choose(&self, candidates: &[Coord], rng: &mut dyn RngCore) -> Option<Coord> {
        candidates.choose(rng).copied()
    }
}

/// Closest legal centre to the origin, random among equally close ones
///
/// Produces compact, blob-like dungeons.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestToOrigin;

impl PlacementPolicy for NearestToOrigin {
    fn choose(&self, candidates: &[Coord], rng: &mut dyn RngCore) -> Option<Coord> {
        let best = candidates.iter().map(|c| c.length_squared()).min()?;
        let closest: Vec<Coord> = candidates
            .iter()
            .copied()
            .filter(|c| c.length_squared() == best)
            .collect();
        closest.choose(rng).copied()
    }
}

/// Sample centres proportionally to a caller-defined weight
///
/// Negative and non-finite weights count as zero. When every weight is zero
/// the choice falls back to uniform.
///
/// ```
/// use rust_dungeon_layout::generation::WeightedPlacement;
///
/// // Favour centres far from the origin for long, stringy dungeons
/// let policy = WeightedPlacement::new(|c| c.length_squared() as f64);
/// # let _ = policy;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WeightedPlacement<F> {
    weight: F,
}

impl<F> WeightedPlacement<F>
where
    F: Fn(Coord) -> f64,
{
    pub fn new(weight: F) -> Self {
        Self { weight }
    }
}

impl<F> PlacementPolicy for WeightedPlacement<F>
where
    F: Fn(Coord) -> f64,
{
    fn choose(&self, candidates: &[Coord], rng: &mut dyn RngCore) -> Option<Coord> {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&c| {
                let w = (self.weight)(c);
                if w.is_finite() && w > 0.0 {
                    w
                } else {
                    0.0
                }
            })
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => candidates.get(dist.sample(rng)).copied(),
            Err(_) => UniformPlacement.choose(candidates, rng),
        }
    }
}

/// Placed rooms plus the union of their cells
#[derive(Debug, Clone, Default)]
pub struct Layout {
    rooms: Vec<RoomInstance>,
    used_cells: HashSet<Coord>,
}

impl Layout {
    /// Rooms in placement order; the first sits at the origin
    #[inline]
    pub fn rooms(&self) -> &[RoomInstance] {
        &self.rooms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Whether any placed room occupies `cell`
    #[inline]
    pub fn is_used(&self, cell: Coord) -> bool {
        self.used_cells.contains(&cell)
    }

    /// Number of occupied cells
    #[inline]
    pub fn used_cell_count(&self) -> usize {
        self.used_cells.len()
    }

    /// Map from every occupied cell to the index of its room
    pub fn cell_owners(&self) -> HashMap<Coord, usize> {
        self.rooms
            .iter()
            .enumerate()
            .flat_map(|(index, room)| room.cells().map(move |c| (c, index)))
            .collect()
    }

    fn push(&mut self, room: RoomInstance) {
        self.used_cells.extend(room.cells());
        self.rooms.push(room);
    }
}

/// Grows a [`Layout`] one room at a time
pub struct LayoutBuilder<'a> {
    library: &'a RoomLibrary,
    table: &'a OffsetTable,
    layout: Layout,
}

impl<'a> LayoutBuilder<'a> {
    /// Start a layout with the first library shape at the origin
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` for an empty library, or
    /// `InvalidConfig` if the table was built for a different library size.
    pub fn new(library: &'a RoomLibrary, table: &'a OffsetTable) -> Result<Self> {
        let start = library
            .get(START_SHAPE_INDEX)
            .ok_or(DungeonError::EmptyCandidateSet)?;
        if table.size() != library.len() {
            return Err(DungeonError::InvalidConfig(format!(
                "offset table covers {} shapes, library has {}",
                table.size(),
                library.len()
            )));
        }

        let mut layout = Layout::default();
        layout.push(RoomInstance::new(
            Coord::ORIGIN,
            start.clone(),
            START_SHAPE_INDEX,
        ));

        Ok(Self {
            library,
            table,
            layout,
        })
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Every centre where `shape_index` touches a placed room without overlap
    ///
    /// Centres reachable from several rooms appear once.
    pub fn candidate_centres(&self, shape_index: usize) -> Result<BTreeSet<Coord>> {
        let shape = self
            .library
            .get(shape_index)
            .ok_or(DungeonError::ShapeIndexOutOfRange(shape_index))?;

        let mut centres = BTreeSet::new();
        for room in self.layout.rooms() {
            let offsets = self
                .table
                .offsets(room.shape_index, shape_index)
                .ok_or(DungeonError::ShapeIndexOutOfRange(room.shape_index))?;

            for &offset in offsets {
                let centre = room.centre + offset;
                let free = shape
                    .cells()
                    .iter()
                    .all(|&local| !self.layout.is_used(centre + local));
                if free {
                    centres.insert(centre);
                }
            }
        }
        Ok(centres)
    }

    /// Place a room of a specific shape
    ///
    /// Returns `Ok(None)` when the shape has no legal centre.
    pub fn place_shape<R, P>(
        &mut self,
        shape_index: usize,
        policy: &P,
        rng: &mut R,
    ) -> Result<Option<&RoomInstance>>
    where
        R: RngCore,
        P: PlacementPolicy + ?Sized,
    {
        let candidates: Vec<Coord> = self.candidate_centres(shape_index)?.into_iter().collect();
        let Some(centre) = policy.choose(&candidates, rng) else {
            return Ok(None);
        };
        let shape = self
            .library
            .get(shape_index)
            .ok_or(DungeonError::ShapeIndexOutOfRange(shape_index))?;

        self.layout
            .push(RoomInstance::new(centre, shape.clone(), shape_index));
        Ok(self.layout.rooms().last())
    }

    /// Place one more room with a randomly chosen shape
    ///
    /// A shape with no legal centre is dropped and another one drawn, up to
    /// `attempts` draws in total.
    ///
    /// # Errors
    ///
    /// Returns `PlacementStarvation` if every draw failed.
    pub fn place_one_more_room<R, P>(
        &mut self,
        policy: &P,
        attempts: usize,
        rng: &mut R,
    ) -> Result<&RoomInstance>
    where
        R: RngCore,
        P: PlacementPolicy + ?Sized,
    {
        let room = self.layout.len();
        for attempt in 1..=attempts {
            let shape_index = rng.gen_range(0..self.library.len());
            if self.place_shape(shape_index, policy, rng)?.is_some() {
                return self
                    .layout
                    .rooms()
                    .last()
                    .ok_or(DungeonError::PlacementStarvation { room, attempts });
            }
            log::debug!(
                "Room {}: shape {} has no legal position (attempt {}/{})",
                room,
                shape_index,
                attempt,
                attempts
            );
        }

        log::warn!(
            "Room {}: no legal position after {} attempts, aborting",
            room,
            attempts
        );
        Err(DungeonError::PlacementStarvation { room, attempts })
    }

    /// Keep placing rooms until the layout holds `room_count` rooms
    pub fn fill<R, P>(
        mut self,
        room_count: usize,
        policy: &P,
        attempts: usize,
        rng: &mut R,
    ) -> Result<Layout>
    where
        R: RngCore,
        P: PlacementPolicy + ?Sized,
    {
        while self.layout.len() < room_count {
            self.place_one_more_room(policy, attempts, rng)?;
        }
        Ok(self.layout)
    }

    pub fn finish(self) -> Layout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomShape;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn library_of(shapes: &[(u32, u32)]) -> RoomLibrary {
        RoomLibrary::from_shapes(
            shapes
                .iter()
                .map(|&(w, h)| RoomShape::rectangle(w, h).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_start_room() {
        let library = library_of(&[(3, 3), (2, 2)]);
        let table = OffsetTable::build(&library);
        let builder = LayoutBuilder::new(&library, &table).unwrap();
        let layout = builder.finish();

        assert_eq!(layout.len(), 1);
        assert_eq!(layout.rooms()[0].centre, Coord::ORIGIN);
        assert_eq!(layout.rooms()[0].shape_index, START_SHAPE_INDEX);
        assert_eq!(layout.used_cell_count(), 9);
    }

    #[test]
    fn test_candidates_single_cell() {
        let library = library_of(&[(1, 1)]);
        let table = OffsetTable::build(&library);
        let builder = LayoutBuilder::new(&library, &table).unwrap();
        let centres = builder.candidate_centres(0).unwrap();

        let expected: BTreeSet<Coord> = Coord::ORIGIN.neighbors().into_iter().collect();
        assert_eq!(centres, expected);
        assert_eq!(
            builder.candidate_centres(3),
            Err(DungeonError::ShapeIndexOutOfRange(3))
        );
    }

    #[test]
    fn test_candidates_exclude_used_cells() {
        let library = library_of(&[(1, 1)]);
        let table = OffsetTable::build(&library);
        let mut builder = LayoutBuilder::new(&library, &table).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        builder.place_shape(0, &UniformPlacement, &mut rng).unwrap();
        let placed = builder.layout().rooms()[1].centre;
        let centres = builder.candidate_centres(0).unwrap();

        assert!(!centres.contains(&Coord::ORIGIN));
        assert!(!centres.contains(&placed));
        // Deduplicated: both cells' neighbors minus the two used cells
        assert_eq!(centres.len(), 6);
    }

    #[test]
    fn test_fill_invariants() {
        let library = library_of(&[(2, 3), (3, 2), (2, 2), (1, 4)]);
        let table = OffsetTable::build(&library);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let layout = LayoutBuilder::new(&library, &table)
            .unwrap()
            .fill(25, &UniformPlacement, 16, &mut rng)
            .unwrap();

        assert_eq!(layout.len(), 25);
        let rooms = layout.rooms();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.overlaps(b));
            }
            if i > 0 {
                assert!(rooms[..i].iter().any(|earlier| a.touches(earlier)));
            }
        }

        let owners = layout.cell_owners();
        assert_eq!(owners.len(), layout.used_cell_count());
    }

    #[test]
    fn test_starvation() {
        // An open grid always has room, so starvation is forced by a policy
        // that refuses every candidate.
        let library = library_of(&[(1, 1)]);
        let table = OffsetTable::build(&library);
        let mut builder = LayoutBuilder::new(&library, &table).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for _ in 0..4 {
            builder.place_shape(0, &NearestToOrigin, &mut rng).unwrap();
        }
        assert!(!builder.candidate_centres(0).unwrap().is_empty());

        let never = RejectAll;
        let result = builder.place_one_more_room(&never, 3, &mut rng);
        assert_eq!(
            result.map(|r| r.centre),
            Err(DungeonError::PlacementStarvation { room: 5, attempts: 3 })
        );
        assert_eq!(builder.layout().len(), 5);
    }

    struct RejectAll;

    impl PlacementPolicy for RejectAll {
        fn choose(&self, _candidates: &[Coord], _rng: &mut dyn RngCore) -> Option<Coord> {
            None
        }
    }

    #[test]
    fn test_policies_on_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(UniformPlacement.choose(&[], &mut rng), None);
        assert_eq!(NearestToOrigin.choose(&[], &mut rng), None);
        assert_eq!(WeightedPlacement::new(|_| 1.0).choose(&[], &mut rng), None);
    }

    #[test]
    fn test_nearest_policy() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let candidates = [Coord::new(5, 0), Coord::new(1, 1), Coord::new(0, 3)];
        assert_eq!(
            NearestToOrigin.choose(&candidates, &mut rng),
            Some(Coord::new(1, 1))
        );
    }

    #[test]
    fn test_weighted_policy() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let candidates = [Coord::new(1, 0), Coord::new(2, 0), Coord::new(3, 0)];
        let only_second = WeightedPlacement::new(|c| if c.x == 2 { 1.0 } else { 0.0 });
        for _ in 0..20 {
            assert_eq!(
                only_second.choose(&candidates, &mut rng),
                Some(Coord::new(2, 0))
            );
        }

        // All-zero weights fall back to uniform
        let zero = WeightedPlacement::new(|_| 0.0);
        let picked = zero.choose(&candidates, &mut rng).unwrap();
        assert!(candidates.contains(&picked));
    }

    #[test]
    fn test_mismatched_table() {
        let small = library_of(&[(1, 1)]);
        let big = library_of(&[(1, 1), (2, 2)]);
        let table = OffsetTable::build(&small);
        assert!(matches!(
            LayoutBuilder::new(&big, &table),
            Err(DungeonError::InvalidConfig(_))
        ));
    }
}
