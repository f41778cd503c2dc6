//! Grid coordinates and canonical cell pairs
//!
//! Every room, wall and passage in a dungeon is expressed in integer grid
//! cells. [`Coord`] is the cell address, [`CoordPair`] an unordered pair of
//! cells used for wall segments.

use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer cell address on the dungeon grid
///
/// Ordering is by distance from the origin, with ties broken by `x` then `y`,
/// which keeps it total and consistent with equality.
///
/// # Example
///
/// ```
/// use rust_dungeon_layout::Coord;
///
/// let a = Coord::new(1, 0);
/// let b = Coord::new(0, 2);
/// assert!(a < b);
/// assert_eq!(a + b, Coord::new(1, 2));
/// assert_eq!(Coord::manhattan_distance(a, b), 3);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// The grid origin (0, 0)
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    /// Unit steps to the 4 axis-aligned neighbors, in north, east, south, west order
    pub const NEIGHBOR_STEPS: [Coord; 4] = [
        Coord { x: 0, y: -1 },
        Coord { x: 1, y: 0 },
        Coord { x: 0, y: 1 },
        Coord { x: -1, y: 0 },
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Negate both components
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Squared Euclidean distance from the origin
    #[inline]
    pub fn length_squared(self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// Sum of absolute components (Manhattan distance from the origin)
    ///
    /// Saturates at `i32::MAX`.
    #[inline]
    pub fn manhattan_length(self) -> i32 {
        self.x.saturating_abs().saturating_add(self.y.saturating_abs())
    }

    /// Largest absolute component, saturating at `i32::MAX`
    #[inline]
    pub fn chebyshev_length(self) -> i32 {
        self.x.saturating_abs().max(self.y.saturating_abs())
    }

    pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
        (a - b).manhattan_length()
    }

    pub fn euclidean_distance(a: Coord, b: Coord) -> f32 {
        ((a - b).length_squared() as f32).sqrt()
    }

    /// The 4 axis-aligned neighbors (north, east, south, west)
    pub fn neighbors(self) -> [Coord; 4] {
        Self::NEIGHBOR_STEPS.map(|step| self + step)
    }

    /// Whether two cells share an edge
    #[inline]
    pub fn is_adjacent_to(self, other: Coord) -> bool {
        Self::manhattan_distance(self, other) == 1
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    #[inline]
    fn neg(self) -> Coord {
        self.inverse()
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length_squared()
            .cmp(&other.length_squared())
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Unordered pair of cells, stored smaller-first
///
/// `CoordPair::new(a, b)` and `CoordPair::new(b, a)` are the same value, so a
/// wall segment has a single identity no matter which side it was found from.
///
/// ```
/// use rust_dungeon_layout::{Coord, CoordPair};
///
/// let a = Coord::new(3, 1);
/// let b = Coord::new(3, 2);
/// assert_eq!(CoordPair::new(a, b), CoordPair::new(b, a));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordPair {
    a: Coord,
    b: Coord,
}

impl CoordPair {
    pub fn new(first: Coord, second: Coord) -> Self {
        if first <= second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }

    /// The smaller cell
    #[inline]
    pub fn a(&self) -> Coord {
        self.a
    }

    /// The larger cell
    #[inline]
    pub fn b(&self) -> Coord {
        self.b
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.a == cell || self.b == cell
    }

    /// Whether the two cells share an edge (true for every wall segment)
    pub fn is_edge(&self) -> bool {
        self.a.is_adjacent_to(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_arithmetic() {
        let a = Coord::new(2, -3);
        assert_eq!(a + Coord::new(1, 1), Coord::new(3, -2));
        assert_eq!(a - Coord::new(1, 1), Coord::new(1, -4));
        assert_eq!(a.inverse(), Coord::new(-2, 3));
        assert_eq!(-a, a.inverse());
    }

    #[test]
    fn test_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(Coord::manhattan_distance(a, b), 7);
        assert!((Coord::euclidean_distance(a, b) - 5.0).abs() < 1e-6);
        assert_eq!(b.chebyshev_length(), 4);
    }

    #[test]
    fn test_lengths_saturate() {
        let far = Coord::new(i32::MIN, i32::MAX);
        assert_eq!(far.chebyshev_length(), i32::MAX);
        assert_eq!(far.manhattan_length(), i32::MAX);
        assert_eq!(Coord::new(i32::MIN, 0).chebyshev_length(), i32::MAX);
    }

    #[test]
    fn test_neighbors() {
        let n = Coord::new(5, 5).neighbors();
        assert_eq!(
            n,
            [
                Coord::new(5, 4),
                Coord::new(6, 5),
                Coord::new(5, 6),
                Coord::new(4, 5)
            ]
        );
        assert!(n.iter().all(|c| c.is_adjacent_to(Coord::new(5, 5))));
        assert!(!Coord::new(0, 0).is_adjacent_to(Coord::new(1, 1)));
    }

    #[test]
    fn test_ordering_by_distance() {
        assert!(Coord::new(0, 1) < Coord::new(2, 0));
        assert!(Coord::new(-1, -1) < Coord::new(0, 2));
        // Equal distance falls back to components
        assert!(Coord::new(-1, 0) < Coord::new(0, 1));
        assert!(Coord::new(0, -1) < Coord::new(0, 1));
        assert_eq!(Coord::new(1, 1).cmp(&Coord::new(1, 1)), Ordering::Equal);
    }

    #[test]
    fn test_pair_canonical() {
        let a = Coord::new(4, 1);
        let b = Coord::new(4, 2);
        let p = CoordPair::new(a, b);
        let q = CoordPair::new(b, a);

        assert_eq!(p, q);
        assert_eq!(hash_of(&p), hash_of(&q));
        assert_eq!(p.a(), a);
        assert_eq!(p.b(), b);
        assert!(p.is_edge());
        assert!(p.contains(a) && p.contains(b));

        let set: HashSet<CoordPair> = [p, q].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_pair_tie_break() {
        // Same distance from origin on both sides
        let a = Coord::new(0, 1);
        let b = Coord::new(1, 0);
        assert_eq!(CoordPair::new(a, b), CoordPair::new(b, a));
        assert_eq!(CoordPair::new(b, a).a(), a);
    }
}
