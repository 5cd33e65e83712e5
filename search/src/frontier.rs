//! Best-first frontier ordering.
//!
//! `BinaryHeap` is a max-heap, so entries wrap their key in `Reverse` to get
//! min-heap behavior (lowest `f_cost` first). Entries are never removed from
//! the middle of the heap: the owner marks nodes dead and skips stale entries
//! when they surface.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierKey<C> {
    pub f_cost: C,
    pub depth: usize,
    pub creation_order: u64,
}

impl<C: Ord> PartialOrd for FrontierKey<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierKey<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

#[derive(Debug, Clone)]
struct FrontierEntry<C> {
    key: Reverse<FrontierKey<C>>,
    handle: usize,
}

impl<C: Ord> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<C: Ord> Eq for FrontierEntry<C> {}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-heap of node handles keyed by [`FrontierKey`].
#[derive(Debug, Clone)]
pub struct BestFirstFrontier<C> {
    heap: BinaryHeap<FrontierEntry<C>>,
    high_water: u64,
}

impl<C: Ord> BestFirstFrontier<C> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// Push a handle with its ordering key.
    pub fn push(&mut self, key: FrontierKey<C>, handle: usize) {
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            handle,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// The best entry, stale or not.
    #[must_use]
    pub fn peek(&self) -> Option<(&FrontierKey<C>, usize)> {
        self.heap.peek().map(|e| (&e.key.0, e.handle))
    }

    /// Remove the best entry.
    pub fn pop(&mut self) -> Option<(FrontierKey<C>, usize)> {
        self.heap.pop().map(|e| (e.key.0, e.handle))
    }

    /// All entries, best first.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&FrontierKey<C>, usize)> {
        let mut entries: Vec<_> = self.heap.iter().map(|e| (&e.key.0, e.handle)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Drop every entry for which `live` returns `false`.
    pub fn retain(&mut self, mut live: impl FnMut(&FrontierKey<C>, usize) -> bool) {
        self.heap.retain(|e| live(&e.key.0, e.handle));
    }

    /// Entry count, including stale entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl<C: Ord> Default for BestFirstFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}
