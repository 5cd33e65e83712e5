//! A* traversal with duplicate detection and re-parenting.
//!
//! Nodes live in a slot arena addressed by handle. `opened` and `closed` map
//! each node value to the handle of its single live node, so domains must
//! give `Hash`/`Eq` the meaning "same state".
//!
//! Rediscovery rules for a successor `s` with total cost `f`:
//!
//! - `s` is open with stored total `>= f`: the stored node is replaced.
//! - `s` is closed with stored total `> f`: the stored node and its whole
//!   expanded subtree are collected, then `s` is reopened under the cursor.
//!   Ties keep the closed node.
//! - otherwise `s` is ignored.
//!
//! A closed node is pruned as soon as its last child is gone, so the arena
//! only holds the frontier plus the ancestors needed for paths.
//!
//! The returned solution is optimal only for admissible heuristics.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use thicket_kernel::cost::{Cost, CostOverflow};
use thicket_kernel::functor::{CostFunction, Expansion, Heuristic, Path};
use tracing::trace;

use crate::error::TraversalError;
use crate::frontier::{BestFirstFrontier, FrontierKey};
use crate::traversal::{CostTreeTraversal, TreeTraversal};

#[derive(Debug, Clone)]
struct AStarNode<T, C> {
    value: T,
    g_cost: C,
    f_cost: C,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    creation_order: u64,
    open: bool,
}

/// A successor priced before any mutation.
struct Priced<T, C> {
    value: T,
    g_cost: C,
    f_cost: C,
}

/// Best-first traversal over `g + h`.
pub struct AStarTraversal<T, C, G, H> {
    generator: Rc<G>,
    heuristic: Rc<H>,
    slots: Vec<Option<AStarNode<T, C>>>,
    free: Vec<usize>,
    opened: HashMap<T, usize>,
    closed: HashMap<T, usize>,
    frontier: BestFirstFrontier<C>,
    cursor: Option<usize>,
    next_order: u64,
}

impl<T, C, G, H> AStarTraversal<T, C, G, H>
where
    T: Clone + Eq + Hash,
    C: Cost,
    G: CostFunction<T, C>,
    H: Heuristic<T, C>,
{
    /// Start at `root` with accumulated cost `root_cost`.
    ///
    /// # Errors
    ///
    /// [`TraversalError::CostOverflow`] if `root_cost + h(root)` overflows.
    pub fn new(generator: G, heuristic: H, root: T, root_cost: C) -> Result<Self, TraversalError> {
        Self::from_shared(Rc::new(generator), Rc::new(heuristic), root, root_cost)
    }

    /// Start at `root` with functors shared with other traversals.
    ///
    /// # Errors
    ///
    /// [`TraversalError::CostOverflow`] if `root_cost + h(root)` overflows.
    pub fn from_shared(
        generator: Rc<G>,
        heuristic: Rc<H>,
        root: T,
        root_cost: C,
    ) -> Result<Self, TraversalError> {
        let f_cost = root_cost.checked_add(&heuristic.estimate(&root))?;
        let mut traversal = Self {
            generator,
            heuristic,
            slots: Vec::new(),
            free: Vec::new(),
            opened: HashMap::new(),
            closed: HashMap::new(),
            frontier: BestFirstFrontier::new(),
            cursor: None,
            next_order: 0,
        };
        traversal.open_node(
            Priced {
                value: root,
                g_cost: root_cost,
                f_cost,
            },
            None,
        );
        traversal.settle();
        Ok(traversal)
    }

    /// Start at the generator's default root and root cost.
    ///
    /// # Errors
    ///
    /// [`TraversalError::DefaultValuesUnsupported`] if either default is
    /// missing; [`TraversalError::CostOverflow`] as for [`Self::new`].
    pub fn from_defaults(generator: G, heuristic: H) -> Result<Self, TraversalError> {
        let root = generator.default_root()?;
        let root_cost = generator.default_root_cost()?;
        Self::new(generator, heuristic, root, root_cost)
    }

    /// Total estimated cost `g + h` of the cursor.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    pub fn f_cost(&self) -> Result<&C, TraversalError> {
        Ok(&self.cursor_node()?.f_cost)
    }

    /// Number of open (frontier) nodes.
    #[must_use]
    pub fn opened_len(&self) -> usize {
        self.opened.len()
    }

    /// Number of closed nodes still retained as ancestors.
    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Largest heap size seen, stale entries included.
    #[must_use]
    pub fn frontier_high_water(&self) -> u64 {
        self.frontier.high_water()
    }

    fn node(&self, handle: usize) -> Option<&AStarNode<T, C>> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: usize) -> Option<&mut AStarNode<T, C>> {
        self.slots.get_mut(handle).and_then(Option::as_mut)
    }

    fn cursor_node(&self) -> Result<&AStarNode<T, C>, TraversalError> {
        self.cursor
            .and_then(|h| self.node(h))
            .ok_or(TraversalError::Empty)
    }

    fn path_of(&self, handle: usize) -> Option<Path<'_, T>> {
        let mut chain = Vec::new();
        let mut next = Some(handle);
        while let Some(h) = next {
            let node = self.node(h)?;
            chain.push(&node.value);
            next = node.parent;
        }
        Path::from_leaf_first(chain)
    }

    fn is_ancestor_or_self(&self, candidate: usize, of: usize) -> bool {
        let mut next = Some(of);
        while let Some(h) = next {
            if h == candidate {
                return true;
            }
            next = self.node(h).and_then(|n| n.parent);
        }
        false
    }

    /// Insert an open node under `parent` and return its handle.
    fn open_node(&mut self, priced: Priced<T, C>, parent: Option<usize>) -> usize {
        let depth = parent
            .and_then(|p| self.node(p))
            .map_or(0, |p| p.depth + 1);
        let creation_order = self.next_order;
        self.next_order += 1;
        let key = FrontierKey {
            f_cost: priced.f_cost.clone(),
            depth,
            creation_order,
        };
        let node = AStarNode {
            value: priced.value,
            g_cost: priced.g_cost,
            f_cost: priced.f_cost,
            parent,
            children: Vec::new(),
            depth,
            creation_order,
            open: true,
        };
        let value = node.value.clone();
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.opened.insert(value, handle);
        self.frontier.push(key, handle);
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.push(handle);
        }
        handle
    }

    /// Free a single slot and drop its map entry.
    fn release(&mut self, handle: usize) -> Option<AStarNode<T, C>> {
        let node = self.slots.get_mut(handle)?.take()?;
        self.free.push(handle);
        let map = if node.open {
            &mut self.opened
        } else {
            &mut self.closed
        };
        if map.get(&node.value) == Some(&handle) {
            map.remove(&node.value);
        }
        Some(node)
    }

    /// Unlink `child` from `parent`. Returns whether `parent` is now childless.
    fn detach(&mut self, parent: usize, child: usize) -> bool {
        self.node_mut(parent).is_some_and(|p| {
            p.children.retain(|&c| c != child);
            p.children.is_empty()
        })
    }

    /// Remove `handle`, then every ancestor it leaves without children.
    fn prune_branch(&mut self, handle: usize) -> usize {
        let mut pruned = 0;
        let mut next = Some(handle);
        while let Some(h) = next {
            let Some(node) = self.release(h) else {
                break;
            };
            pruned += 1;
            next = node.parent.filter(|&p| self.detach(p, h));
        }
        pruned
    }

    /// Remove the subtree rooted at `handle`, then prune upward.
    fn collect_subtree(&mut self, handle: usize) -> usize {
        let parent = self.node(handle).and_then(|n| n.parent);
        let mut collected = 0;
        let mut pending = vec![handle];
        while let Some(h) = pending.pop() {
            if let Some(node) = self.release(h) {
                collected += 1;
                pending.extend(node.children);
            }
        }
        if let Some(p) = parent {
            if self.detach(p, handle) {
                collected += self.prune_branch(p);
            }
        }
        collected
    }

    /// Remove an open node that is being superseded. Its parent is pruned if
    /// left childless, unless that parent is `keep`.
    fn supersede_open(&mut self, handle: usize, keep: usize) {
        let parent = self.release(handle).and_then(|n| n.parent);
        if let Some(p) = parent {
            if self.detach(p, handle) && p != keep {
                self.prune_branch(p);
            }
        }
    }

    fn is_live_open(&self, handle: usize, creation_order: u64) -> bool {
        self.node(handle)
            .is_some_and(|n| n.open && n.creation_order == creation_order)
    }

    /// Point the cursor at the best live open node, discarding stale entries.
    fn settle(&mut self) {
        if self.frontier.len() > 2 * self.opened.len() + 16 {
            let slots = &self.slots;
            self.frontier.retain(|key, h| {
                slots
                    .get(h)
                    .and_then(Option::as_ref)
                    .is_some_and(|n| n.open && n.creation_order == key.creation_order)
            });
        }
        self.cursor = loop {
            let Some((order, handle)) = self.frontier.peek().map(|(k, h)| (k.creation_order, h))
            else {
                break None;
            };
            if self.is_live_open(handle, order) {
                break Some(handle);
            }
            self.frontier.pop();
        };
    }

    fn price_successors(
        &self,
        cursor: &AStarNode<T, C>,
        children: Vec<T>,
    ) -> Result<Vec<Priced<T, C>>, CostOverflow> {
        children
            .into_iter()
            .map(|value| {
                let edge = self.generator.transition_cost(&cursor.value, &value);
                let g_cost = cursor.g_cost.checked_add(&edge)?;
                let f_cost = g_cost.checked_add(&self.heuristic.estimate(&value))?;
                Ok(Priced {
                    value,
                    g_cost,
                    f_cost,
                })
            })
            .collect()
    }

    /// Apply the rediscovery rules. Returns whether `priced` should be opened.
    fn admit(&mut self, priced: &Priced<T, C>, cursor: usize) -> bool {
        if let Some(&existing) = self.opened.get(&priced.value) {
            if existing == cursor {
                return false;
            }
            let replace = self.node(existing).is_some_and(|n| n.f_cost >= priced.f_cost);
            if replace {
                trace!(handle = existing, "superseded open node");
                self.supersede_open(existing, cursor);
            }
            return replace;
        }
        if let Some(&existing) = self.closed.get(&priced.value) {
            let improves = self.node(existing).is_some_and(|n| n.f_cost > priced.f_cost);
            if !improves || self.is_ancestor_or_self(existing, cursor) {
                return false;
            }
            let collected = self.collect_subtree(existing);
            trace!(handle = existing, collected, "reopened closed node");
            return true;
        }
        true
    }
}

impl<T, C, G, H> TreeTraversal for AStarTraversal<T, C, G, H>
where
    T: Clone + Eq + Hash,
    C: Cost,
    G: CostFunction<T, C>,
    H: Heuristic<T, C>,
{
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        let cursor = self.cursor.ok_or(TraversalError::Empty)?;
        let priced = {
            let path = self.path_of(cursor).ok_or(TraversalError::Empty)?;
            let Expansion::Successors(children) = self.generator.expand(&path) else {
                return Ok(false);
            };
            let node = self.node(cursor).ok_or(TraversalError::Empty)?;
            self.price_successors(node, children)?
        };

        let mut added = 0usize;
        for successor in priced {
            if self.admit(&successor, cursor) {
                self.open_node(successor, Some(cursor));
                added += 1;
            }
        }

        if added == 0 {
            let pruned = self.prune_branch(cursor);
            trace!(pruned, "dead end");
        } else if let Some(node) = self.node_mut(cursor) {
            node.open = false;
            let value = node.value.clone();
            self.opened.remove(&value);
            self.closed.insert(value, cursor);
            trace!(successors = added, "expanded");
        }
        self.settle();
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        let cursor = self.cursor.ok_or(TraversalError::Empty)?;
        let pruned = self.prune_branch(cursor);
        trace!(pruned, "backtrack");
        self.settle();
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.cursor.is_none()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        Ok(&self.cursor_node()?.value)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        self.cursor
            .and_then(|h| self.path_of(h))
            .ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.cursor_node().ok().map(|n| n.depth)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(self.generator.is_goal(&self.path()?))
    }

    fn leaves(&self) -> Vec<&T> {
        self.frontier
            .sorted()
            .into_iter()
            .filter(|(key, h)| self.is_live_open(*h, key.creation_order))
            .filter_map(|(_, h)| self.node(h).map(|n| &n.value))
            .collect()
    }
}

impl<T, C, G, H> CostTreeTraversal for AStarTraversal<T, C, G, H>
where
    T: Clone + Eq + Hash,
    C: Cost,
    G: CostFunction<T, C>,
    H: Heuristic<T, C>,
{
    type Cost = C;

    fn cost(&self) -> Result<&C, TraversalError> {
        Ok(&self.cursor_node()?.g_cost)
    }
}
