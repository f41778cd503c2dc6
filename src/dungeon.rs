//! Dungeon main structure

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DungeonConfig;
use crate::connectivity::{Connectivity, RoomPair};
use crate::coord::{Coord, CoordPair};
use crate::error::Result;
use crate::generation::{
    build_library, generate_layout, Layout, PlacementPolicy, RoomLibrary, UniformPlacement,
};
use crate::room::RoomInstance;

/// A generated dungeon: placed rooms, walls and passages
///
/// The dungeon keeps the library it was built from and a cell-to-room map for
/// fast lookups.
///
/// # Examples
///
/// ```
/// use rust_dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .room_count(10)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let dungeon = Dungeon::generate(config).unwrap();
/// assert_eq!(dungeon.room_count(), 10);
/// assert_eq!(dungeon.passages().len(), dungeon.connected_pairs().count());
/// ```
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// Configuration used to generate this dungeon
    config: DungeonConfig,

    /// Shapes the rooms were drawn from
    library: RoomLibrary,

    /// Placed rooms in placement order
    layout: Layout,

    /// Walls and passages
    connectivity: Connectivity,

    /// Owning room index of every occupied cell
    owners: HashMap<Coord, usize>,
}

impl Dungeon {
    /// Generate a dungeon with uniform random placement
    ///
    /// # Errors
    ///
    /// `InvalidRoomCount`/`InvalidConfig` for a bad configuration,
    /// `EmptyCandidateSet` if the size range yields no shapes, and
    /// `PlacementStarvation` if a room cannot be placed.
    pub fn generate(config: DungeonConfig) -> Result<Self> {
        Self::generate_with_policy(config, &UniformPlacement)
    }

    /// Generate a dungeon with a custom placement policy
    ///
    /// ```
    /// use rust_dungeon_layout::*;
    /// use rust_dungeon_layout::generation::NearestToOrigin;
    ///
    /// let config = DungeonConfigBuilder::new().seed(5).build().unwrap();
    /// let dungeon = Dungeon::generate_with_policy(config, &NearestToOrigin).unwrap();
    /// assert!(dungeon.is_fully_connected());
    /// ```
    pub fn generate_with_policy<P>(config: DungeonConfig, policy: &P) -> Result<Self>
    where
        P: PlacementPolicy + ?Sized,
    {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let library = build_library(&config, &mut rng)?;
        Self::run(config, library, policy, &mut rng)
    }

    /// Generate a dungeon from caller-supplied room shapes
    ///
    /// The size range and library limit in `config` are ignored; shape 0 of
    /// `library` is the start room.
    pub fn generate_with_library<P>(
        config: DungeonConfig,
        library: RoomLibrary,
        policy: &P,
    ) -> Result<Self>
    where
        P: PlacementPolicy + ?Sized,
    {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::run(config, library, policy, &mut rng)
    }

    fn run<P>(
        config: DungeonConfig,
        library: RoomLibrary,
        policy: &P,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self>
    where
        P: PlacementPolicy + ?Sized,
    {
        let layout = generate_layout(&config, &library, policy, rng)?;
        let owners = layout.cell_owners();
        let connectivity = Connectivity::extract_with_owners(&layout, &owners, rng);

        log::info!(
            "Generated dungeon: {} rooms, {} cells, seed {}",
            layout.len(),
            owners.len(),
            config.seed
        );

        Ok(Self {
            config,
            library,
            layout,
            connectivity,
            owners,
        })
    }

    #[inline]
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    #[inline]
    pub fn library(&self) -> &RoomLibrary {
        &self.library
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.layout.len()
    }

    /// Rooms in placement order
    #[inline]
    pub fn rooms(&self) -> &[RoomInstance] {
        self.layout.rooms()
    }

    /// Get a room by index
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get_room(&self, index: usize) -> Option<&RoomInstance> {
        self.layout.rooms().get(index)
    }

    /// Wall segments to render; passages are not included
    #[inline]
    pub fn walls(&self) -> &BTreeSet<CoordPair> {
        self.connectivity.walls()
    }

    /// One passage per pair of touching rooms
    #[inline]
    pub fn passages(&self) -> &BTreeMap<RoomPair, CoordPair> {
        self.connectivity.passages()
    }

    /// Room pairs joined by a passage
    pub fn connected_pairs(&self) -> impl Iterator<Item = RoomPair> + '_ {
        self.connectivity.passages().keys().copied()
    }

    /// Indices of rooms sharing a passage with `room`
    ///
    /// Returns an empty list for an invalid index.
    pub fn connections(&self, room: usize) -> Vec<usize> {
        self.connected_pairs()
            .filter_map(|(a, b)| {
                if a == room {
                    Some(b)
                } else if b == room {
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Index of the room occupying `cell`, if any
    #[inline]
    pub fn find_room_at(&self, cell: Coord) -> Option<usize> {
        self.owners.get(&cell).copied()
    }

    /// Rooms reachable from `start` within `hops` passages (BFS)
    ///
    /// Includes `start` itself. Returns an empty list for an invalid index.
    pub fn find_rooms_within_hops(&self, start: usize, hops: usize) -> Vec<usize> {
        if start >= self.room_count() {
            return vec![];
        }

        let graph = self.connectivity.room_graph(self.room_count());
        let mut visited = HashSet::from([start]);
        let mut found = vec![start];
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((room, depth)) = queue.pop_front() {
            if depth == hops {
                continue;
            }
            for &next in &graph[room] {
                if visited.insert(next) {
                    found.push(next);
                    queue.push_back((next, depth + 1));
                }
            }
        }

        found
    }

    /// Whether every room can be reached from the start room
    pub fn is_fully_connected(&self) -> bool {
        self.find_rooms_within_hops(0, self.room_count()).len() == self.room_count()
    }

    /// Smallest and largest occupied cell coordinates
    pub fn bounds(&self) -> (Coord, Coord) {
        let mut cells = self.owners.keys();
        let Some(&first) = cells.next() else {
            return (Coord::ORIGIN, Coord::ORIGIN);
        };
        cells.fold((first, first), |(min, max), c| {
            (
                Coord::new(min.x.min(c.x), min.y.min(c.y)),
                Coord::new(max.x.max(c.x), max.y.max(c.y)),
            )
        })
    }
}
