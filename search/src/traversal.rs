//! The traversal contract shared by every search algorithm.
//!
//! A traversal owns a search tree rooted at one value: a frontier of
//! unexpanded nodes plus whatever expanded ancestors the algorithm keeps for
//! path reconstruction. The *cursor* is the frontier node the traversal will
//! expand next.
//!
//! # State machine
//!
//! ```text
//!   non-empty ──move_forward / backtrack──▶ non-empty
//!       │                                       │
//!       └──────── last frontier node pruned ────┴──▶ empty (terminal)
//! ```
//!
//! Once empty, every mutating call and every cursor query returns
//! [`TraversalError::Empty`]; `is_empty` stays `true` forever.

use thicket_kernel::cost::Cost;
use thicket_kernel::functor::Path;

use crate::error::TraversalError;

/// A search tree explored one expansion at a time.
pub trait TreeTraversal {
    /// Problem node value.
    type Node;

    /// Expand the cursor.
    ///
    /// Returns `Ok(false)` when the generator reports the cursor as terminal;
    /// the traversal is left unchanged. Otherwise the successors are admitted
    /// (a node without successors is pruned together with every ancestor left
    /// without pending children) and `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal;
    /// [`TraversalError::CostOverflow`] if a successor cost is unrepresentable,
    /// in which case nothing was mutated.
    fn move_forward(&mut self) -> Result<bool, TraversalError>;

    /// Discard the cursor and any ancestor left without pending children.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    fn backtrack(&mut self) -> Result<(), TraversalError>;

    /// Whether the frontier is exhausted.
    fn is_empty(&self) -> bool;

    /// The node the traversal will expand next.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    fn cursor(&self) -> Result<&Self::Node, TraversalError>;

    /// Root-to-cursor path.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    fn path(&self) -> Result<Path<'_, Self::Node>, TraversalError>;

    /// Edge count from the root to the cursor; `None` when empty.
    fn depth(&self) -> Option<usize>;

    /// Goal test of the owned generator applied to the cursor path.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    fn is_goal(&self) -> Result<bool, TraversalError>;

    /// Frontier node values, cursor first.
    fn leaves(&self) -> Vec<&Self::Node>;
}

/// A traversal that accumulates path cost.
pub trait CostTreeTraversal: TreeTraversal {
    /// Accumulated cost type.
    type Cost: Cost;

    /// Cost of the path from the root to the cursor.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    fn cost(&self) -> Result<&Self::Cost, TraversalError>;
}

/// A traversal that can produce a structurally independent copy.
///
/// Mutating the copy never affects the original. Functors are shared.
pub trait Copyable: Sized {
    /// Deep copy of the search tree.
    #[must_use]
    fn copy_of(&self) -> Self;
}
