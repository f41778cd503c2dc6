//! Room shapes and placed room instances
//!
//! A [`RoomShape`] is a rigid footprint of cells relative to a local origin.
//! A [`RoomInstance`] is that footprint placed at a global centre.

use std::collections::{BTreeSet, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MAX_ROOM_DIMENSION;
use crate::coord::Coord;
use crate::error::{DungeonError, Result};

/// Largest absolute x or y a shape cell may have relative to its origin
///
/// Offset search visits on the order of `(4 * extent)^2` cells per shape pair.
pub const MAX_SHAPE_EXTENT: i32 = 2 * MAX_ROOM_DIMENSION as i32;

/// Rigid room footprint relative to a local origin
///
/// Cells are stored sorted and deduplicated, so two shapes built from the same
/// cell set compare equal regardless of input order. Shapes are never empty.
///
/// # Example
///
/// ```
/// use rust_dungeon_layout::{Coord, RoomShape};
///
/// let shape = RoomShape::rectangle(3, 2).unwrap();
/// assert_eq!(shape.cell_count(), 6);
/// assert!(shape.contains(Coord::new(-1, 0)));
/// assert!(shape.contains(Coord::new(1, 1)));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomShape {
    name: String,
    cells: Vec<Coord>,
}

impl RoomShape {
    /// Create a shape from a set of local cell offsets
    ///
    /// # Errors
    ///
    /// Returns `EmptyShape` if `cells` yields nothing, and `ShapeTooLarge` if
    /// any cell has a component beyond [`MAX_SHAPE_EXTENT`].
    pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = Coord>) -> Result<Self> {
        let name = name.into();
        let cells: Vec<Coord> = cells
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if cells.is_empty() {
            return Err(DungeonError::EmptyShape(name));
        }

        let extent = cells
            .iter()
            .map(|c| c.x.unsigned_abs().max(c.y.unsigned_abs()))
            .max()
            .unwrap_or(0);
        if extent > MAX_SHAPE_EXTENT.unsigned_abs() {
            return Err(DungeonError::ShapeTooLarge {
                name,
                extent: i64::from(extent),
                limit: MAX_SHAPE_EXTENT,
            });
        }

        Ok(Self { name, cells })
    }

    /// Solid `width` x `height` rectangle centred on the origin
    ///
    /// Odd dimensions are exactly centred. Even dimensions put the extra cell
    /// on the positive side, so the span along an axis of size `n` is
    /// `-(n - 1) / 2 ..= n / 2`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyShape` if either dimension is zero, and `InvalidConfig` if
    /// either exceeds [`MAX_ROOM_DIMENSION`].
    pub fn rectangle(width: u32, height: u32) -> Result<Self> {
        let name = format!("{}x{}", width, height);
        if width == 0 || height == 0 {
            return Err(DungeonError::EmptyShape(name));
        }
        if width > MAX_ROOM_DIMENSION || height > MAX_ROOM_DIMENSION {
            return Err(DungeonError::InvalidConfig(format!(
                "rectangle {} exceeds maximum room dimension ({})",
                name, MAX_ROOM_DIMENSION
            )));
        }

        let (x_min, x_max) = centred_span(width);
        let (y_min, y_max) = centred_span(height);

        let cells = (x_min..=x_max).flat_map(|x| (y_min..=y_max).map(move |y| Coord::new(x, y)));
        Self::new(name, cells)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local cell offsets, sorted by distance from the origin
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, offset: Coord) -> bool {
        self.cells.binary_search(&offset).is_ok()
    }

    /// Largest absolute component over all cells
    pub fn extent(&self) -> i32 {
        self.cells
            .iter()
            .map(|c| c.chebyshev_length())
            .max()
            .unwrap_or(0)
    }

    /// Cells just outside the footprint that share an edge with it
    pub fn halo(&self) -> HashSet<Coord> {
        let own: HashSet<Coord> = self.cells.iter().copied().collect();
        self.cells
            .iter()
            .flat_map(|c| c.neighbors())
            .filter(|n| !own.contains(n))
            .collect()
    }
}

/// Callers keep `size` within `1..=MAX_ROOM_DIMENSION`
fn centred_span(size: u32) -> (i32, i32) {
    let size = size.min(MAX_ROOM_DIMENSION) as i32;
    (-(size - 1) / 2, size / 2)
}

/// A room shape placed at a global centre
///
/// Instances are created by the layout builder and never move afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInstance {
    /// Global position of the shape's local origin
    pub centre: Coord,
    /// Index of the shape in the room library
    pub shape_index: usize,
    shape: RoomShape,
}

impl RoomInstance {
    pub fn new(centre: Coord, shape: RoomShape, shape_index: usize) -> Self {
        Self {
            centre,
            shape_index,
            shape,
        }
    }

    #[inline]
    pub fn shape(&self) -> &RoomShape {
        &self.shape
    }

    /// Global cells occupied by this room
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shape.cells().iter().map(move |&offset| self.centre + offset)
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.shape.contains(cell - self.centre)
    }

    /// Whether the two rooms share at least one cell
    pub fn overlaps(&self, other: &RoomInstance) -> bool {
        let occupied: HashSet<Coord> = self.cells().collect();
        other.cells().any(|c| occupied.contains(&c))
    }

    /// Whether the two rooms share an edge without overlapping
    ///
    /// Contact only at a corner does not count.
    pub fn touches(&self, other: &RoomInstance) -> bool {
        if self.overlaps(other) {
            return false;
        }
        let halo = self.shape.halo();
        other.cells().any(|c| halo.contains(&(c - self.centre)))
    }
}
