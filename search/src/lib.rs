//! Thicket Search: traversal engine and search drivers.
//!
//! This crate provides the search layer of Thicket. It depends only on
//! `thicket_kernel`; it does NOT depend on `thicket_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! thicket_kernel  ←  thicket_search  ←  thicket_harness
//! (cost, functors)   (traversals,        (worlds, runner,
//!                     drivers, policy)    reports)
//! ```
//!
//! # Key types
//!
//! - [`TreeTraversal`] / [`CostTreeTraversal`] / [`Copyable`] -- the traversal contract
//! - [`DepthFirstTraversal`], [`DepthFirstCostTraversal`] -- backtracking over a node stack
//! - [`BreadthFirstTraversal`] -- FIFO expansion over a two-stack queue
//! - [`AStarTraversal`] -- open/closed maps with re-parenting
//! - [`RecursiveBestFirstTraversal`] -- linear-space best-first with backed-up bounds
//! - [`FiniteSetTraversal`], [`LevelTraversal`] -- lazy backtracking over value domains
//! - [`direct`] and [`iterative`] -- drivers built only on the contract
//! - [`SearchPolicyV1`] -- algorithm and budget configuration
//! - [`Metered`] -- expansion counting and budget enforcement

#![forbid(unsafe_code)]

pub mod astar;
pub mod breadth_first;
pub mod depth_first;
pub mod direct;
pub mod error;
pub mod finite_set;
pub mod frontier;
pub mod iterative;
pub mod metered;
pub mod policy;
pub mod queue;
pub mod rbfs;
mod stack;
pub mod traversal;


pub use astar::AStarTraversal;
pub use breadth_first::BreadthFirstTraversal;
pub use depth_first::{DepthFirstCostTraversal, DepthFirstTraversal};
pub use direct::Solution;
pub use error::{PolicyError, TraversalError};
pub use finite_set::{FiniteSetTraversal, LevelTraversal};
pub use metered::{Metered, SearchStatsV1};
pub use policy::{AlgorithmV1, SearchPolicyV1};
pub use rbfs::RecursiveBestFirstTraversal;
pub use traversal::{Copyable, CostTreeTraversal, TreeTraversal};
