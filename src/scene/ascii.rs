//! Text rendering of a dungeon for debugging and demos

use crate::coord::CoordPair;
use crate::dungeon::Dungeon;

const FLOOR: char = '.';
const EMPTY: char = ' ';
const WALL_ALONG_X: char = '-';
const WALL_ALONG_Y: char = '|';
const CORNER: char = '+';

/// Draw the dungeon at doubled resolution
///
/// Cells sit at odd positions and the edges between them at the even
/// positions in between. Passages are drawn as floor.
///
/// ```
/// use rust_dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new().seed(1).room_count(1).unwrap().build().unwrap();
/// let dungeon = Dungeon::generate(config).unwrap();
/// let map = render_ascii(&dungeon);
/// assert!(map.contains('.'));
/// ```
pub fn render_ascii(dungeon: &Dungeon) -> String {
    let (min, max) = dungeon.bounds();
    let width = (2 * (max.x - min.x + 1) + 1) as usize;
    let height = (2 * (max.y - min.y + 1) + 1) as usize;
    let mut grid = vec![vec![EMPTY; width]; height];

    // Doubled coordinates of a cell or of the midpoint between two cells
    let slot = |segment: &CoordPair| {
        let (a, b) = (segment.a(), segment.b());
        (
            (a.x + b.x - 2 * min.x + 1) as usize,
            (a.y + b.y - 2 * min.y + 1) as usize,
        )
    };

    for room in dungeon.rooms() {
        for cell in room.cells() {
            let (x, y) = slot(&CoordPair::new(cell, cell));
            grid[y][x] = FLOOR;
            for neighbor in cell.neighbors() {
                if room.contains(neighbor) {
                    let (x, y) = slot(&CoordPair::new(cell, neighbor));
                    grid[y][x] = FLOOR;
                }
            }
        }
    }

    for segment in dungeon.walls() {
        let (x, y) = slot(segment);
        grid[y][x] = if segment.a().x == segment.b().x {
            WALL_ALONG_X
        } else {
            WALL_ALONG_Y
        };
    }

    for segment in dungeon.passages().values() {
        let (x, y) = slot(segment);
        grid[y][x] = FLOOR;
    }

    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            let horizontal = [x.checked_sub(1), Some(x + 1)]
                .into_iter()
                .flatten()
                .any(|nx| grid[y].get(nx) == Some(&WALL_ALONG_X));
            let vertical = [y.checked_sub(1), Some(y + 1)]
                .into_iter()
                .flatten()
                .any(|ny| grid.get(ny).map(|row| row[x]) == Some(WALL_ALONG_Y));
            if horizontal || vertical {
                grid[y][x] = CORNER;
            } else if y > 0 && x > 0 && y + 1 < height && x + 1 < width {
                let enclosed = [grid[y - 1][x], grid[y + 1][x], grid[y][x - 1], grid[y][x + 1]]
                    .iter()
                    .all(|&c| c == FLOOR);
                if enclosed {
                    grid[y][x] = FLOOR;
                }
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
