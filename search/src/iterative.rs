//! Iterative deepening over copies of a traversal.
//!
//! Each round runs a bounded depth-first pass on a fresh [`Copyable::copy_of`]
//! of the input, which is never mutated. A round that finds a goal ends the
//! search; otherwise the bound grows and a new copy is taken.

use tracing::debug;

use crate::direct::{snapshot, Solution};
use crate::error::TraversalError;
use crate::traversal::{Copyable, CostTreeTraversal, TreeTraversal};

/// Depth-bounded iterative deepening.
///
/// Returns the first goal path found at the smallest depth limit that
/// reaches one, or `None` once a round completes without ever being cut by
/// the limit (the space is exhausted).
///
/// # Errors
///
/// Propagates traversal errors.
pub fn deepen_iteratively<Tr>(tr: &Tr) -> Result<Option<Vec<Tr::Node>>, TraversalError>
where
    Tr: TreeTraversal + Copyable,
    Tr::Node: Clone,
{
    if tr.is_empty() {
        return Ok(None);
    }
    let mut limit = 0usize;
    loop {
        debug!(limit, "deepening round");
        let mut round = tr.copy_of();
        let mut cut = false;
        while let Some(depth) = round.depth() {
            if round.is_goal()? {
                return Ok(Some(round.path()?.to_vec()));
            }
            if depth >= limit {
                cut = true;
                round.backtrack()?;
            } else if !round.move_forward()? {
                round.backtrack()?;
            }
        }
        if !cut {
            return Ok(None);
        }
        limit += 1;
    }
}

/// Cost-bounded iterative deepening (IDA*-style escalation).
///
/// The first round's threshold is the root cost. Every later threshold is the
/// smallest cost that exceeded the previous one, so the first goal accepted
/// is a cheapest one for non-negative edge costs. `None` once no node exceeds
/// the threshold.
///
/// # Errors
///
/// Propagates traversal errors.
pub fn deepen_iteratively_by_cost<Tr>(
    tr: &Tr,
) -> Result<Option<Solution<Tr::Node, Tr::Cost>>, TraversalError>
where
    Tr: CostTreeTraversal + Copyable,
    Tr::Node: Clone,
{
    if tr.is_empty() {
        return Ok(None);
    }
    let mut threshold = tr.cost()?.clone();
    loop {
        debug!(threshold = ?threshold, "deepening round");
        let mut round = tr.copy_of();
        let mut next: Option<Tr::Cost> = None;
        while !round.is_empty() {
            let cost = round.cost()?;
            if *cost > threshold {
                if !matches!(&next, Some(n) if cost >= n) {
                    next = Some(cost.clone());
                }
                round.backtrack()?;
            } else if round.is_goal()? {
                return snapshot(&round).map(Some);
            } else if !round.move_forward()? {
                round.backtrack()?;
            }
        }
        match next {
            Some(cost) => threshold = cost,
            None => return Ok(None),
        }
    }
}
