//! Core layout generation
//!
//! Builds a room library, precomputes touching offsets between every pair of
//! shapes, then places rooms one at a time until the requested count is met.

mod library;
mod offsets;
mod placement;

pub use library::{rectangle_candidates, RoomLibrary};
pub use offsets::{compute_offsets, search_bound, OffsetTable};
pub use placement::{
    Layout, LayoutBuilder, NearestToOrigin, PlacementPolicy, UniformPlacement,
    WeightedPlacement, START_SHAPE_INDEX,
};

use rand::RngCore;

use crate::config::DungeonConfig;
use crate::error::Result;

/// Sample the rectangle library described by the configuration
pub fn build_library<R: RngCore>(config: &DungeonConfig, rng: &mut R) -> Result<RoomLibrary> {
    let library = RoomLibrary::rectangles(
        config.min_room_size,
        config.max_room_size,
        config.max_library_shapes,
        rng,
    )?;
    log::info!("Sampled {} room shapes for generation", library.len());
    Ok(library)
}

/// Place `config.room_count` rooms using shapes from `library`
///
/// Returns rooms only; walls and passages are derived afterwards.
pub fn generate_layout<R, P>(
    config: &DungeonConfig,
    library: &RoomLibrary,
    policy: &P,
    rng: &mut R,
) -> Result<Layout>
where
    R: RngCore,
    P: PlacementPolicy + ?Sized,
{
    config.validate()?;

    // Step 1: Offsets for every shape pair, shared by all placements
    let table = OffsetTable::build(library);

    // Step 2: Grow the layout from the start room
    LayoutBuilder::new(library, &table)?.fill(
        config.room_count,
        policy,
        config.placement_attempts,
        rng,
    )
}
