//! Reference worlds for the harness runner.

pub mod coin_change;
pub mod grid;
pub mod queens;
pub mod weighted_graph;

pub use coin_change::{CoinChange, CoinNode};
pub use grid::{Cell, GridMaze};
pub use queens::{Queens, QueensNode};
pub use weighted_graph::WeightedGraph;
