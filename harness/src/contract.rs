//! World contract: the minimal trait a search world must implement.
//!
//! Worlds provide expansion, goal tests, edge costs and an estimate through
//! the kernel functor traits, plus a root and a stable rendering of nodes.
//! Worlds may NOT implement metering, digests or report assembly; those are
//! runner concerns.

use thicket_kernel::functor::{CostFunction, Heuristic};

/// A runnable search domain over node type `T` with `u64` costs.
///
/// A world provides:
/// - A unique identifier
/// - The root node and its cost
/// - Expansion, goal test, edge cost and heuristic (via supertraits)
/// - A rendering of nodes for reports
///
/// The heuristic must be admissible for the best-first algorithms to report
/// optimal costs. Worlds without a meaningful estimate return zero.
pub trait SearchWorldV1<T>: CostFunction<T, u64> + Heuristic<T, u64> {
    /// Unique world identifier (e.g., `"coin_change"`).
    fn world_id(&self) -> &str;

    /// Starting node.
    fn root(&self) -> T;

    /// Cost already accumulated at the root.
    fn root_cost(&self) -> u64 {
        0
    }

    /// Whether a node value alone determines expansion and goal status.
    ///
    /// Path-aware worlds return `false`; the runner then refuses algorithms
    /// and decorators that key on node values (A*, memoization).
    fn node_is_state(&self) -> bool {
        true
    }

    /// Stable human-readable form of a node, used in reports.
    fn render(&self, node: &T) -> String;
}

/// Typed failure while building a world from a description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The description is structurally invalid.
    #[error("invalid world description: {detail}")]
    Invalid { detail: String },
    /// A required marker (e.g., start or goal cell) is missing or repeated.
    #[error("expected exactly one '{marker}', found {found}")]
    Marker { marker: char, found: usize },
}
