//! Expansion metering and budget enforcement.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use thicket_kernel::functor::Path;

use crate::error::TraversalError;
use crate::traversal::{Copyable, CostTreeTraversal, TreeTraversal};

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatsV1 {
    /// `move_forward` calls that admitted successors or pruned a dead end.
    pub expansions: u64,
    /// `move_forward` calls on a terminal cursor.
    pub terminal_hits: u64,
    /// Explicit `backtrack` calls.
    pub backtracks: u64,
    /// Deepest cursor observed.
    pub max_depth: u64,
}

/// Decorator counting the operations of any traversal.
///
/// Copies share one set of counters, so the rounds of an iterative-deepening
/// search are metered as a whole.
pub struct Metered<Tr> {
    inner: Tr,
    stats: Rc<Cell<SearchStatsV1>>,
    max_expansions: Option<u64>,
}

impl<Tr: TreeTraversal> Metered<Tr> {
    /// Wrap `inner`. With `Some(limit)`, the expansion after the `limit`-th
    /// fails with [`TraversalError::BudgetExhausted`].
    #[must_use]
    pub fn new(inner: Tr, max_expansions: Option<u64>) -> Self {
        let metered = Self {
            inner,
            stats: Rc::new(Cell::new(SearchStatsV1::default())),
            max_expansions,
        };
        metered.observe_depth();
        metered
    }

    /// Snapshot of the shared counters.
    #[must_use]
    pub fn stats(&self) -> SearchStatsV1 {
        self.stats.get()
    }

    /// The decorated traversal.
    #[must_use]
    pub fn inner(&self) -> &Tr {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> Tr {
        self.inner
    }

    fn update(&self, f: impl FnOnce(&mut SearchStatsV1)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    fn observe_depth(&self) {
        if let Some(depth) = self.inner.depth() {
            let depth = depth as u64;
            self.update(|s| s.max_depth = s.max_depth.max(depth));
        }
    }
}

impl<Tr: TreeTraversal> TreeTraversal for Metered<Tr> {
    type Node = Tr::Node;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        if let Some(limit) = self.max_expansions {
            if self.stats.get().expansions >= limit {
                return Err(TraversalError::BudgetExhausted { limit });
            }
        }
        let produced = self.inner.move_forward()?;
        if produced {
            self.update(|s| s.expansions += 1);
        } else {
            self.update(|s| s.terminal_hits += 1);
        }
        self.observe_depth();
        Ok(produced)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        self.inner.backtrack()?;
        self.update(|s| s.backtracks += 1);
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn cursor(&self) -> Result<&Tr::Node, TraversalError> {
        self.inner.cursor()
    }

    fn path(&self) -> Result<Path<'_, Tr::Node>, TraversalError> {
        self.inner.path()
    }

    fn depth(&self) -> Option<usize> {
        self.inner.depth()
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        self.inner.is_goal()
    }

    fn leaves(&self) -> Vec<&Tr::Node> {
        self.inner.leaves()
    }
}

impl<Tr: CostTreeTraversal> CostTreeTraversal for Metered<Tr> {
    type Cost = Tr::Cost;

    fn cost(&self) -> Result<&Tr::Cost, TraversalError> {
        self.inner.cost()
    }
}

impl<Tr: Copyable> Copyable for Metered<Tr> {
    fn copy_of(&self) -> Self {
        Self {
            inner: self.inner.copy_of(),
            stats: Rc::clone(&self.stats),
            max_expansions: self.max_expansions,
        }
    }
}
