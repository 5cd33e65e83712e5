//! Single-pass drivers: plain search, threshold search, branch-and-bound and
//! enumeration of all optimal solutions.
//!
//! Drivers only use the [`TreeTraversal`] contract. A cursor that the
//! generator reports as terminal without being a goal is backtracked so every
//! loop iteration makes progress.

use serde::Serialize;
use tracing::debug;

use crate::error::TraversalError;
use crate::traversal::{CostTreeTraversal, TreeTraversal};

/// A root-to-goal path and its accumulated cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution<T, C> {
    pub path: Vec<T>,
    pub cost: C,
}

/// Capture the cursor path and cost.
///
/// # Errors
///
/// [`TraversalError::Empty`] on an empty traversal.
pub fn snapshot<Tr>(tr: &Tr) -> Result<Solution<Tr::Node, Tr::Cost>, TraversalError>
where
    Tr: CostTreeTraversal,
    Tr::Node: Clone,
{
    Ok(Solution {
        path: tr.path()?.to_vec(),
        cost: tr.cost()?.clone(),
    })
}

/// Expand or backtrack the cursor depending on what the generator says.
fn step<Tr: TreeTraversal>(tr: &mut Tr) -> Result<(), TraversalError> {
    if !tr.move_forward()? {
        tr.backtrack()?;
    }
    Ok(())
}

/// Advance until the cursor is a goal or the traversal is empty.
///
/// Returns whether a goal was reached; the cursor then points at it.
///
/// # Errors
///
/// Propagates traversal errors.
pub fn search_forward<Tr: TreeTraversal>(tr: &mut Tr) -> Result<bool, TraversalError> {
    while !tr.is_empty() {
        if tr.is_goal()? {
            return Ok(true);
        }
        step(tr)?;
    }
    Ok(false)
}

/// Like [`search_forward`], but any cursor whose cost exceeds `threshold` is
/// backtracked before it is tested or expanded.
///
/// # Errors
///
/// Propagates traversal errors.
pub fn search_forward_within<Tr: CostTreeTraversal>(
    tr: &mut Tr,
    threshold: &Tr::Cost,
) -> Result<bool, TraversalError> {
    while !tr.is_empty() {
        if tr.cost()? > threshold {
            tr.backtrack()?;
        } else if tr.is_goal()? {
            return Ok(true);
        } else {
            step(tr)?;
        }
    }
    Ok(false)
}

/// Depth-first branch-and-bound.
///
/// The first goal becomes the incumbent; afterwards every branch whose cost
/// reaches the incumbent cost is cut, and strictly cheaper goals replace it.
/// Runs until the traversal is empty. `None` when no goal exists.
///
/// # Errors
///
/// Propagates traversal errors.
pub fn branch_and_bound<Tr>(
    tr: &mut Tr,
) -> Result<Option<Solution<Tr::Node, Tr::Cost>>, TraversalError>
where
    Tr: CostTreeTraversal,
    Tr::Node: Clone,
{
    if !search_forward(tr)? {
        return Ok(None);
    }
    let mut best = snapshot(tr)?;
    debug!(cost = ?best.cost, depth = best.path.len() - 1, "first incumbent");
    tr.backtrack()?;

    while !tr.is_empty() {
        if *tr.cost()? >= best.cost {
            tr.backtrack()?;
        } else if tr.is_goal()? {
            best = snapshot(tr)?;
            debug!(cost = ?best.cost, depth = best.path.len() - 1, "new incumbent");
            tr.backtrack()?;
        } else {
            step(tr)?;
        }
    }
    Ok(Some(best))
}

/// Every goal tied at the optimal cost, in discovery order.
///
/// Branches are cut only when strictly worse than the best goal seen, so
/// ties reached through zero-cost edges are still enumerated. A strictly
/// cheaper goal discards everything collected so far.
///
/// # Errors
///
/// Propagates traversal errors.
pub fn find_all_solutions<Tr>(
    tr: &mut Tr,
) -> Result<Vec<Solution<Tr::Node, Tr::Cost>>, TraversalError>
where
    Tr: CostTreeTraversal,
    Tr::Node: Clone,
{
    let mut found: Vec<Solution<Tr::Node, Tr::Cost>> = Vec::new();
    while !tr.is_empty() {
        let cost = tr.cost()?;
        let bound = found.first().map(|s| &s.cost);
        if bound.is_some_and(|b| cost > b) {
            tr.backtrack()?;
        } else if tr.is_goal()? {
            if bound.is_some_and(|b| cost < b) {
                debug!(cost = ?cost, discarded = found.len(), "cheaper solution");
                found.clear();
            }
            found.push(snapshot(tr)?);
            tr.backtrack()?;
        } else {
            step(tr)?;
        }
    }
    Ok(found)
}
