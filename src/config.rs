//! Dungeon Configuration and Builder
//!
//! This module provides configuration types for deterministic dungeon generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};

/// Largest room count a single run accepts
pub const MAX_ROOM_COUNT: usize = 100;

/// Largest width or height of a generated rectangle
pub const MAX_ROOM_DIMENSION: u32 = 32;

/// Configuration for deterministic dungeon generation
///
/// The same configuration will always produce the identical dungeon.
///
/// # Example
///
/// ```rust
/// use rust_dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .room_count(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DungeonConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonConfig {
    /// Random seed for library sampling, placement and passage choice
    pub seed: u64,

    /// Total number of rooms in the finished layout, including the start room
    pub room_count: usize,

    /// Smallest rectangle width/height in the candidate library
    pub min_room_size: u32,

    /// Largest rectangle width/height in the candidate library (inclusive)
    pub max_room_size: u32,

    /// How many candidate shapes are sampled into the library for a run
    pub max_library_shapes: usize,

    /// How many random shapes are tried for one room before giving up
    pub placement_attempts: usize,
}

impl DungeonConfig {
    /// Re-check the invariants the builder enforces
    ///
    /// Fields are public, so generation validates again before doing any work.
    pub fn validate(&self) -> Result<()> {
        check_room_count(i64::try_from(self.room_count).unwrap_or(i64::MAX))?;
        check_room_size(self.max_room_size)?;
        if self.max_library_shapes == 0 {
            return Err(DungeonError::InvalidConfig(
                "max_library_shapes must be at least 1".into(),
            ));
        }
        if self.placement_attempts == 0 {
            return Err(DungeonError::InvalidConfig(
                "placement_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        DungeonConfigBuilder::new().build_unchecked()
    }
}

fn check_room_count(count: i64) -> Result<usize> {
    if count < 1 || count > MAX_ROOM_COUNT as i64 {
        return Err(DungeonError::InvalidRoomCount(count));
    }
    Ok(count as usize)
}

fn check_room_size(max: u32) -> Result<()> {
    if max > MAX_ROOM_DIMENSION {
        return Err(DungeonError::InvalidConfig(format!(
            "room size must be <= {} (got {})",
            MAX_ROOM_DIMENSION, max
        )));
    }
    Ok(())
}

/// Builder for creating DungeonConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(12345)
///     .room_count(20)
///     .unwrap()
///     .room_size_range(2, 5)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.room_count, 20);
/// assert!(DungeonConfigBuilder::new().room_count(150).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DungeonConfigBuilder {
    seed: Option<u64>,
    room_count: usize,
    min_room_size: u32,
    max_room_size: u32,
    max_library_shapes: usize,
    placement_attempts: usize,
}

impl DungeonConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - room_count: 10
    /// - room sizes: 2..=3
    /// - max_library_shapes: 12
    /// - placement_attempts: 16
    pub fn new() -> Self {
        Self {
            seed: None,
            room_count: 10,
            min_room_size: 2,
            max_room_size: 3,
            max_library_shapes: 12,
            placement_attempts: 16,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of rooms to place
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoomCount` unless `1 <= count <= MAX_ROOM_COUNT`.
    pub fn room_count(mut self, count: i64) -> Result<Self> {
        self.room_count = check_room_count(count)?;
        Ok(self)
    }

    /// Set the inclusive width/height range of generated rectangles
    ///
    /// A range with `min > max` is accepted but produces an empty library,
    /// which generation reports as `EmptyCandidateSet`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max > MAX_ROOM_DIMENSION`.
    pub fn room_size_range(mut self, min: u32, max: u32) -> Result<Self> {
        check_room_size(max)?;
        self.min_room_size = min;
        self.max_room_size = max;
        Ok(self)
    }

    /// Set how many shapes are sampled into the library
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` is zero.
    pub fn max_library_shapes(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(DungeonError::InvalidConfig(
                "max_library_shapes must be at least 1".into(),
            ));
        }
        self.max_library_shapes = count;
        Ok(self)
    }

    /// Set how many shapes are tried for a room before generation fails
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `attempts` is zero.
    pub fn placement_attempts(mut self, attempts: usize) -> Result<Self> {
        if attempts == 0 {
            return Err(DungeonError::InvalidConfig(
                "placement_attempts must be at least 1".into(),
            ));
        }
        self.placement_attempts = attempts;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<DungeonConfig> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    fn build_unchecked(self) -> DungeonConfig {
        DungeonConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            room_count: self.room_count,
            min_room_size: self.min_room_size,
            max_room_size: self.max_room_size,
            max_library_shapes: self.max_library_shapes,
            placement_attempts: self.placement_attempts,
        }
    }
}

impl Default for DungeonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
