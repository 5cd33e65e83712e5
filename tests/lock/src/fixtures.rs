//! Canonical world instances used across acceptance tests and the fixture
//! binary.
//!
//! # Panics
//!
//! Constructors panic if a built-in description is invalid. These are
//! test-only invariants.

use thicket_harness::worlds::{CoinChange, GridMaze, Queens, WeightedGraph};

/// Denominations `{7, 5, 1}` and target 94: greedy uses 16 coins, the
/// optimum is 14 (12 sevens and 2 fives).
#[must_use]
pub fn coin_classic() -> CoinChange {
    CoinChange::new(vec![7, 5, 1], 94).unwrap()
}

/// A target the denominations cannot reach.
#[must_use]
pub fn coin_unreachable() -> CoinChange {
    CoinChange::new(vec![4, 6], 7).unwrap()
}

pub const MAZE: &str = "
    S...#.
    .##.#.
    ...#..
    .#...G
";

/// A small cyclic maze whose shortest route costs 8.
#[must_use]
pub fn maze() -> GridMaze {
    GridMaze::parse(MAZE).unwrap()
}

/// Graph on which A* first closes `c` through the costlier `a` route and
/// must re-parent it under `b` once `b` is expanded.
///
/// Optimum `s → b → c → g` costs 8; `s → a → c → g` costs 9.
#[must_use]
pub fn reparenting_graph() -> WeightedGraph {
    WeightedGraph::from_edges(
        "s",
        "g",
        &[
            ("s", "a", 1),
            ("s", "b", 4),
            ("a", "c", 5),
            ("b", "c", 1),
            ("c", "g", 3),
        ],
        &[("a", 1), ("b", 4), ("c", 0)],
    )
    .unwrap()
}

#[must_use]
pub fn queens(size: usize) -> Queens {
    Queens::new(size).unwrap()
}
