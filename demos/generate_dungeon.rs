//! Example: Generate a dungeon
//!
//! Demonstrates the generation pipeline and prints a text map.

use rust_dungeon_layout::generation::NearestToOrigin;
use rust_dungeon_layout::*;

fn main() -> Result<()> {
    println!("Dungeon Layout Generation Example");
    println!("=================================\n");

    let config = DungeonConfigBuilder::new()
        .seed(42)
        .room_count(12)?
        .room_size_range(2, 4)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Rooms: {}", config.room_count);
    println!("  Room sizes: {}..={}", config.min_room_size, config.max_room_size);
    println!();

    let dungeon = Dungeon::generate(config)?;
    println!("Library shapes:");
    for (index, shape) in dungeon.library().shapes().iter().enumerate() {
        println!("  [{}] {} ({} cells)", index, shape.name(), shape.cell_count());
    }
    println!();

    println!("Rooms:");
    for (index, room) in dungeon.rooms().iter().enumerate() {
        println!(
            "  Room {}: shape {} at ({}, {}), connects to {:?}",
            index,
            room.shape().name(),
            room.centre.x,
            room.centre.y,
            dungeon.connections(index)
        );
    }
    println!();

    let scene = generate_scene(&dungeon, DEFAULT_TILE_WIDTH);
    println!("Scene:");
    println!("  Floor tiles: {}", scene.floor_count());
    println!("  Walls: {}", scene.wall_count());
    println!("  Archways: {}", scene.archway_count());
    println!();

    println!("{}\n", render_ascii(&dungeon));

    // Same seed, compact placement
    let compact = Dungeon::generate_with_policy(config, &NearestToOrigin)?;
    println!("Compact variant:\n{}", render_ascii(&compact));

    Ok(())
}
