//! Scene placement data for a Dungeon
//!
//! Generates engine-agnostic transforms for floor tiles, walls and archways.
//! Nothing is spawned here; a host engine turns the data into objects.

mod ascii;

pub use ascii::render_ascii;

use glam::{Vec2, Vec3};

use crate::coord::{Coord, CoordPair};
use crate::dungeon::Dungeon;

/// Default world-space size of one grid cell
pub const DEFAULT_TILE_WIDTH: f32 = 500.0;

/// Direction a wall segment runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallAxis {
    /// Separates two cells stacked along y
    AlongX,
    /// Separates two cells side by side along x
    AlongY,
}

impl WallAxis {
    pub fn of(segment: &CoordPair) -> Self {
        if segment.a().x == segment.b().x {
            WallAxis::AlongX
        } else {
            WallAxis::AlongY
        }
    }

    /// Yaw rotation in degrees for a mesh modelled along x
    pub fn yaw_degrees(self) -> f32 {
        match self {
            WallAxis::AlongX => 0.0,
            WallAxis::AlongY => 90.0,
        }
    }
}

/// A floor tile at one occupied cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorTile {
    pub cell: Coord,
    /// Index of the owning room
    pub room: usize,
    pub position: Vec3,
}

/// A wall or archway placed on the edge between two cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePlacement {
    pub segment: CoordPair,
    /// Midpoint of the two cell centres in world space (z = 0)
    pub position: Vec3,
    pub axis: WallAxis,
    pub yaw_degrees: f32,
}

impl EdgePlacement {
    pub fn new(segment: CoordPair, tile_width: f32) -> Self {
        let axis = WallAxis::of(&segment);
        let mid = (cell_to_world(segment.a()) + cell_to_world(segment.b())) * 0.5 * tile_width;
        Self {
            segment,
            position: mid.extend(0.0),
            axis,
            yaw_degrees: axis.yaw_degrees(),
        }
    }
}

/// Engine-agnostic scene output
#[derive(Debug, Clone, Default)]
pub struct SceneData {
    pub floors: Vec<FloorTile>,
    pub walls: Vec<EdgePlacement>,
    /// Passages between rooms
    pub archways: Vec<EdgePlacement>,
}

impl SceneData {
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn archway_count(&self) -> usize {
        self.archways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}

fn cell_to_world(cell: Coord) -> Vec2 {
    Vec2::new(cell.x as f32, cell.y as f32)
}

/// Generate placement data with `tile_width` world units per cell
///
/// # Example
///
/// ```
/// use rust_dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new().seed(3).build().unwrap();
/// let dungeon = Dungeon::generate(config).unwrap();
/// let scene = generate_scene(&dungeon, DEFAULT_TILE_WIDTH);
/// assert_eq!(scene.wall_count(), dungeon.walls().len());
/// assert_eq!(scene.archway_count(), dungeon.passages().len());
/// ```
pub fn generate_scene(dungeon: &Dungeon, tile_width: f32) -> SceneData {
    let floors = dungeon
        .rooms()
        .iter()
        .enumerate()
        .flat_map(|(room, instance)| {
            instance.cells().map(move |cell| FloorTile {
                cell,
                room,
                position: (cell_to_world(cell) * tile_width).extend(0.0),
            })
        })
        .collect();

    let walls = dungeon
        .walls()
        .iter()
        .map(|&segment| EdgePlacement::new(segment, tile_width))
        .collect();

    let archways = dungeon
        .passages()
        .values()
        .map(|&segment| EdgePlacement::new(segment, tile_width))
        .collect();

    SceneData {
        floors,
        walls,
        archways,
    }
}
