//! Error types for dungeon layout generation

use thiserror::Error;

/// Errors that can occur during dungeon generation or queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DungeonError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Requested room count is outside `1..=MAX_ROOM_COUNT`
    #[error("room count out of bounds: {0}")]
    InvalidRoomCount(i64),
    /// A room shape was built without any cells
    #[error("room shape '{0}' has no cells")]
    EmptyShape(String),
    /// A room shape has a cell further than `MAX_SHAPE_EXTENT` from its origin
    #[error("room shape '{name}' reaches {extent} cells from its origin (limit {limit})")]
    ShapeTooLarge {
        /// Name of the rejected shape
        name: String,
        /// Largest absolute component found among its cells
        extent: i64,
        /// Largest accepted component
        limit: i32,
    },
    /// The room library contains no usable shapes
    #[error("room library is empty")]
    EmptyCandidateSet,
    /// No legal position was found for a new room
    #[error("no legal position for room {room} after {attempts} attempts")]
    PlacementStarvation {
        /// Index the room would have had in the layout
        room: usize,
        /// Number of shapes tried before giving up
        attempts: usize,
    },
    /// A library index does not exist
    #[error("shape index out of range: {0}")]
    ShapeIndexOutOfRange(usize),
}

/// Result type alias for dungeon operations
pub type Result<T> = std::result::Result<T, DungeonError>;
