//! Memoizing decorator for search functors.
//!
//! [`Memoized`] wraps any functor and implements the same contracts. Each
//! cached operation has its own table:
//!
//! | operation | key |
//! |---|---|
//! | `expand`, `is_goal` | cursor node value |
//! | `transition_cost` | ordered pair `(from, to)` |
//! | `estimate` | node value |
//!
//! The wrapped functor must be a pure function of those keys. Generator
//! caching therefore requires [`NodeIsState`]: a generator whose expansion
//! depends on ancestors cannot be wrapped.
//!
//! The cache uses `RefCell` and is not `Sync`: one decorator serves the
//! traversals of a single search.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

use crate::cost::Cost;
use crate::functor::{
    CostFunction, DefaultValuesUnsupported, Expansion, Heuristic, NodeGenerator, NodeIsState,
    Path,
};

/// Hit/miss counters of one cached operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Calls answered from the table.
    pub hits: u64,
    /// Calls forwarded to the wrapped functor.
    pub misses: u64,
}

/// Snapshot of all cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub expand: CacheCounters,
    pub is_goal: CacheCounters,
    pub transition_cost: CacheCounters,
    pub estimate: CacheCounters,
}

#[derive(Debug, Default)]
struct Counter {
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl Counter {
    fn hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    fn miss(&self) {
        self.misses.set(self.misses.get() + 1);
    }

    fn snapshot(&self) -> CacheCounters {
        CacheCounters {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }
}

/// Look up `key`, computing and storing the value on a miss.
fn cached<K, V, F>(table: &RefCell<HashMap<K, V>>, counter: &Counter, key: &K, compute: F) -> V
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnOnce() -> V,
{
    if let Some(v) = table.borrow().get(key) {
        counter.hit();
        return v.clone();
    }
    counter.miss();
    // The borrow is released before calling out: the wrapped functor may
    // re-enter this decorator through a shared handle.
    let value = compute();
    table.borrow_mut().insert(key.clone(), value.clone());
    value
}

/// Caching decorator over a functor `F` for node type `T` and cost type `C`.
///
/// `C` defaults to `()` for generators without costs.
#[derive(Debug)]
pub struct Memoized<F, T, C = ()> {
    inner: F,
    expansions: RefCell<HashMap<T, Expansion<T>>>,
    goals: RefCell<HashMap<T, bool>>,
    edges: RefCell<HashMap<(T, T), C>>,
    estimates: RefCell<HashMap<T, C>>,
    expand_counter: Counter,
    goal_counter: Counter,
    edge_counter: Counter,
    estimate_counter: Counter,
}

impl<F, T, C> Memoized<F, T, C>
where
    T: Hash + Eq,
{
    /// Wrap `inner` with empty caches.
    #[must_use]
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            expansions: RefCell::new(HashMap::new()),
            goals: RefCell::new(HashMap::new()),
            edges: RefCell::new(HashMap::new()),
            estimates: RefCell::new(HashMap::new()),
            expand_counter: Counter::default(),
            goal_counter: Counter::default(),
            edge_counter: Counter::default(),
            estimate_counter: Counter::default(),
        }
    }

    /// The wrapped functor.
    #[must_use]
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwrap, discarding all cached values.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Drop every cached value. Counters are kept.
    pub fn clear(&self) {
        self.expansions.borrow_mut().clear();
        self.goals.borrow_mut().clear();
        self.edges.borrow_mut().clear();
        self.estimates.borrow_mut().clear();
    }

    /// Total number of cached entries across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expansions.borrow().len()
            + self.goals.borrow().len()
            + self.edges.borrow().len()
            + self.estimates.borrow().len()
    }

    /// Whether no value is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            expand: self.expand_counter.snapshot(),
            is_goal: self.goal_counter.snapshot(),
            transition_cost: self.edge_counter.snapshot(),
            estimate: self.estimate_counter.snapshot(),
        }
    }
}

impl<F, T, C> NodeGenerator<T> for Memoized<F, T, C>
where
    F: NodeGenerator<T> + NodeIsState,
    T: Hash + Eq + Clone,
{
    fn expand(&self, path: &Path<'_, T>) -> Expansion<T> {
        cached(&self.expansions, &self.expand_counter, path.node(), || {
            self.inner.expand(path)
        })
    }

    fn is_goal(&self, path: &Path<'_, T>) -> bool {
        cached(&self.goals, &self.goal_counter, path.node(), || {
            self.inner.is_goal(path)
        })
    }

    fn default_root(&self) -> Result<T, DefaultValuesUnsupported> {
        self.inner.default_root()
    }
}

impl<F: NodeIsState, T, C> NodeIsState for Memoized<F, T, C> {}

impl<F, T, C> CostFunction<T, C> for Memoized<F, T, C>
where
    F: CostFunction<T, C> + NodeIsState,
    T: Hash + Eq + Clone,
    C: Cost,
{
    fn transition_cost(&self, from: &T, to: &T) -> C {
        let key = (from.clone(), to.clone());
        cached(&self.edges, &self.edge_counter, &key, || {
            self.inner.transition_cost(from, to)
        })
    }

    fn default_root_cost(&self) -> Result<C, DefaultValuesUnsupported> {
        self.inner.default_root_cost()
    }
}

impl<F, T, C> Heuristic<T, C> for Memoized<F, T, C>
where
    F: Heuristic<T, C>,
    T: Hash + Eq + Clone,
    C: Clone,
{
    fn estimate(&self, node: &T) -> C {
        cached(&self.estimates, &self.estimate_counter, node, || {
            self.inner.estimate(node)
        })
    }
}
