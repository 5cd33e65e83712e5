//! Shared helpers for thicket benchmark suites.

use thicket_harness::worlds::GridMaze;

/// An open `size × size` room with the start in one corner and the goal in
/// the opposite one. Every cell is open, so the room is maximally cyclic.
///
/// # Panics
///
/// Panics if `size < 2`. Benchmark setup failures are fatal.
#[must_use]
pub fn open_room(size: usize) -> GridMaze {
    assert!(size >= 2, "room needs at least two cells per side");
    let mut text = String::with_capacity(size * (size + 1));
    for row in 0..size {
        for col in 0..size {
            text.push(match (row, col) {
                (0, 0) => 'S',
                (r, c) if r == size - 1 && c == size - 1 => 'G',
                _ => '.',
            });
        }
        text.push('\n');
    }
    GridMaze::parse(&text).expect("generated room parses")
}

/// A `size × size` room split by a wall with one gap at the far end, so
/// the Manhattan estimate is badly misleading.
///
/// # Panics
///
/// Panics if `size < 3`.
#[must_use]
pub fn walled_room(size: usize) -> GridMaze {
    assert!(size >= 3, "walled room needs at least three cells per side");
    let wall = size / 2;
    let mut text = String::with_capacity(size * (size + 1));
    for row in 0..size {
        for col in 0..size {
            text.push(match (row, col) {
                (0, 0) => 'S',
                (0, c) if c == size - 1 => 'G',
                (r, c) if c == wall && r + 1 < size => '#',
                _ => '.',
            });
        }
        text.push('\n');
    }
    GridMaze::parse(&text).expect("generated room parses")
}
