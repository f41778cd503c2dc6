//! Candidate room library
//!
//! Builds the catalogue of rectangle shapes for a size range, shuffles it and
//! keeps a bounded sample. Indices into the resulting [`RoomLibrary`] are the
//! stable shape identities for the rest of a run.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{DungeonError, Result};
use crate::room::RoomShape;

/// Ordered, immutable set of room shapes used by one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLibrary {
    shapes: Vec<RoomShape>,
}

impl RoomLibrary {
    /// Wrap caller-supplied shapes
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` if `shapes` is empty.
    pub fn from_shapes(shapes: Vec<RoomShape>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(DungeonError::EmptyCandidateSet);
        }
        Ok(Self { shapes })
    }

    /// Shuffle `candidates` and keep at most `max_shapes` of them
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` if nothing survives.
    pub fn sample<R: Rng + ?Sized>(
        mut candidates: Vec<RoomShape>,
        max_shapes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        candidates.shuffle(rng);
        candidates.truncate(max_shapes);
        Self::from_shapes(candidates)
    }

    /// Sample a library of rectangles with sides in `min_size..=max_size`
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use rust_dungeon_layout::generation::RoomLibrary;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let library = RoomLibrary::rectangles(2, 3, 12, &mut rng).unwrap();
    /// assert_eq!(library.len(), 4);
    /// ```
    pub fn rectangles<R: Rng + ?Sized>(
        min_size: u32,
        max_size: u32,
        max_shapes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let candidates = rectangle_candidates(min_size, max_size);
        log::debug!(
            "Generated {} candidate rooms, sampling up to {}",
            candidates.len(),
            max_shapes
        );
        Self::sample(candidates, max_shapes, rng)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&RoomShape> {
        self.shapes.get(index)
    }

    #[inline]
    pub fn shapes(&self) -> &[RoomShape] {
        &self.shapes
    }
}

/// One solid rectangle per (width, height) combination in the range
///
/// Zero-sized dimensions are skipped; an inverted range yields nothing.
pub fn rectangle_candidates(min_size: u32, max_size: u32) -> Vec<RoomShape> {
    (min_size..=max_size)
        .flat_map(|width| (min_size..=max_size).map(move |height| (width, height)))
        .filter_map(|(width, height)| RoomShape::rectangle(width, height).ok())
        .collect()
}
