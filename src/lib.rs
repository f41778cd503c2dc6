//! Grid-based dungeon layout generation
//!
//! A standalone library for generating dungeons out of touching rooms on an
//! integer grid, suitable for use with any game engine (Bevy, Godot, etc.)
//!
//! Rooms are drawn from a library of shapes. Every new room is placed so that
//! it shares an edge with the existing layout without overlapping it. Walls
//! are then derived from room boundaries, and exactly one wall segment between
//! each pair of touching rooms is removed to form a passage.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_dungeon_layout::*;
//!
//! // Generate a dungeon
//! let config = DungeonConfigBuilder::new()
//!     .seed(42)
//!     .room_count(20).unwrap()
//!     .build().unwrap();
//!
//! let dungeon = Dungeon::generate(config).unwrap();
//!
//! // Placement data for rendering
//! let scene = generate_scene(&dungeon, DEFAULT_TILE_WIDTH);
//! println!("{} walls, {} archways", scene.wall_count(), scene.archway_count());
//! println!("{}", render_ascii(&dungeon));
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration, coordinates and rooms

// Modules
pub mod error;
pub mod config;
pub mod coord;
pub mod room;
pub mod generation;
pub mod connectivity;
pub mod dungeon;
pub mod scene;

// Re-export core types for convenience
pub use error::{DungeonError, Result};
pub use config::{DungeonConfig, DungeonConfigBuilder, MAX_ROOM_COUNT, MAX_ROOM_DIMENSION};
pub use coord::{Coord, CoordPair};
pub use room::{RoomInstance, RoomShape, MAX_SHAPE_EXTENT};
pub use generation::{Layout, PlacementPolicy, RoomLibrary};
pub use connectivity::{Connectivity, RoomPair};
pub use dungeon::Dungeon;
pub use scene::{generate_scene, render_ascii, EdgePlacement, FloorTile, SceneData, WallAxis, DEFAULT_TILE_WIDTH};

// Re-export glam vector types used in scene data
pub use glam::{Vec2, Vec3};
