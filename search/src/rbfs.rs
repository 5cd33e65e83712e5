//! Recursive best-first search as an explicit level stack.
//!
//! Each level holds the live siblings of one expanded node, stably ordered by
//! *bound*: a node's own `f = g + h`, or the backed-up value of a subtree
//! that was abandoned because it grew past the level limit. The cursor is the
//! best node of the deepest level; the path is the best node of every level.
//!
//! Memory is bounded by depth times branching factor. The price is
//! re-expansion: an abandoned subtree is forgotten and regenerated from its
//! backed-up root when that bound becomes the global best again.

use std::rc::Rc;

use thicket_kernel::cost::{Cost, CostOverflow};
use thicket_kernel::functor::{CostFunction, Expansion, Heuristic, Path};
use tracing::trace;

use crate::error::TraversalError;
use crate::traversal::{Copyable, CostTreeTraversal, TreeTraversal};

#[derive(Debug, Clone)]
struct RbfsNode<T, C> {
    value: T,
    g_cost: C,
    bound: C,
}

#[derive(Debug, Clone)]
struct Level<T, C> {
    /// Sorted by `bound`, ties in insertion order.
    nodes: Vec<RbfsNode<T, C>>,
    /// Bound above which this level is abandoned; `None` is unbounded.
    limit: Option<C>,
    /// Smallest bound among children rejected when the level was built.
    dropped: Option<C>,
}

impl<T, C: Ord> Level<T, C> {
    fn insert(&mut self, node: RbfsNode<T, C>) {
        let at = self.nodes.partition_point(|n| n.bound <= node.bound);
        self.nodes.insert(at, node);
    }

    fn exceeds_limit(&self) -> bool {
        match (self.nodes.first(), &self.limit) {
            (Some(best), Some(limit)) => best.bound > *limit,
            _ => false,
        }
    }
}

fn min_option<C: Ord>(a: Option<C>, b: Option<C>) -> Option<C> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Linear-space best-first traversal with backed-up bounds.
pub struct RecursiveBestFirstTraversal<T, C, G, H> {
    generator: Rc<G>,
    heuristic: Rc<H>,
    levels: Vec<Level<T, C>>,
}

impl<T, C, G, H> RecursiveBestFirstTraversal<T, C, G, H>
where
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
        let bound = root_cost.checked_add(&heuristic.estimate(&root))?;
        Ok(Self {
            generator,
            heuristic,
            levels: vec![Level {
                nodes: vec![RbfsNode {
                    value: root,
                    g_cost: root_cost,
                    bound,
                }],
                limit: None,
                dropped: None,
            }],
        })
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

    /// Current bound of the cursor.
    ///
    /// # Errors
    ///
    /// [`TraversalError::Empty`] on an empty traversal.
    pub fn bound(&self) -> Result<&C, TraversalError> {
        Ok(&self.cursor_node()?.bound)
    }

    fn cursor_node(&self) -> Result<&RbfsNode<T, C>, TraversalError> {
        self.levels
            .last()
            .and_then(|l| l.nodes.first())
            .ok_or(TraversalError::Empty)
    }

    /// Price successors of the cursor; the bound of a child never drops below
    /// the backed-up bound of its parent.
    fn price_successors(
        &self,
        parent: &RbfsNode<T, C>,
        children: Vec<T>,
    ) -> Result<Vec<RbfsNode<T, C>>, CostOverflow> {
        children
            .into_iter()
            .map(|value| {
                let edge = self.generator.transition_cost(&parent.value, &value);
                let g_cost = parent.g_cost.checked_add(&edge)?;
                let f_cost = g_cost.checked_add(&self.heuristic.estimate(&value))?;
                Ok(RbfsNode {
                    value,
                    g_cost,
                    bound: f_cost.max(parent.bound.clone()),
                })
            })
            .collect()
    }

    /// Restore the invariant that the deepest level is non-empty and its best
    /// node is within the level limit, unwinding levels and backing bounds up.
    fn settle(&mut self) {
        loop {
            let Some(top) = self.levels.last() else {
                return;
            };
            let exhausted = top.nodes.is_empty();
            if !exhausted && !top.exceeds_limit() {
                return;
            }
            let Some(level) = self.levels.pop() else {
                return;
            };
            let best = level.nodes.into_iter().next().map(|n| n.bound);
            let backed_up = min_option(best, level.dropped);
            let Some(parent_level) = self.levels.last_mut() else {
                return;
            };
            if parent_level.nodes.is_empty() {
                continue;
            }
            let mut parent = parent_level.nodes.remove(0);
            match backed_up {
                Some(bound) => {
                    trace!(depth = self.levels.len() - 1, "backed up bound");
                    parent.bound = bound.max(parent.bound);
                    if let Some(level) = self.levels.last_mut() {
                        level.insert(parent);
                    }
                }
                None => trace!(depth = self.levels.len() - 1, "subtree exhausted"),
            }
        }
    }
}

impl<T, C, G, H> TreeTraversal for RecursiveBestFirstTraversal<T, C, G, H>
where
    C: Cost,
    G: CostFunction<T, C>,
    H: Heuristic<T, C>,
{
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        let children = {
            let path = self.path()?;
            let Expansion::Successors(children) = self.generator.expand(&path) else {
                return Ok(false);
            };
            self.price_successors(self.cursor_node()?, children)?
        };
        let Some(top) = self.levels.last_mut() else {
            return Err(TraversalError::Empty);
        };

        if children.is_empty() {
            top.nodes.remove(0);
            trace!("dead end");
            self.settle();
            return Ok(true);
        }

        let sibling = top.nodes.get(1).map(|n| n.bound.clone());
        let limit = min_option(top.limit.clone(), sibling);
        let mut level = Level {
            nodes: Vec::with_capacity(children.len()),
            limit: limit.clone(),
            dropped: None,
        };
        for child in children {
            if !matches!(&limit, Some(l) if child.bound > *l) {
                level.insert(child);
            } else {
                level.dropped = min_option(level.dropped.take(), Some(child.bound));
            }
        }

        if level.nodes.is_empty() {
            // Nothing fits: back up the smallest rejected bound in place.
            let mut node = top.nodes.remove(0);
            if let Some(bound) = level.dropped {
                node.bound = bound;
            }
            top.insert(node);
            trace!("all successors above limit");
            self.settle();
        } else {
            trace!(
                depth = self.levels.len(),
                successors = level.nodes.len(),
                "expanded"
            );
            self.levels.push(level);
        }
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        let top = self
            .levels
            .last_mut()
            .filter(|l| !l.nodes.is_empty())
            .ok_or(TraversalError::Empty)?;
        top.nodes.remove(0);
        trace!("backtrack");
        self.settle();
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        Ok(&self.cursor_node()?.value)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        let chain = self
            .levels
            .iter()
            .map(|l| l.nodes.first().map(|n| &n.value))
            .collect::<Option<Vec<_>>>()
            .ok_or(TraversalError::Empty)?;
        Path::from_root_first(chain).ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(self.generator.is_goal(&self.path()?))
    }

    fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        for (i, level) in self.levels.iter().rev().enumerate() {
            let skip = usize::from(i > 0);
            leaves.extend(level.nodes.iter().skip(skip).map(|n| &n.value));
        }
        leaves
    }
}

impl<T, C, G, H> CostTreeTraversal for RecursiveBestFirstTraversal<T, C, G, H>
where
    C: Cost,
    G: CostFunction<T, C>,
    H: Heuristic<T, C>,
{
    type Cost = C;

    fn cost(&self) -> Result<&C, TraversalError> {
        Ok(&self.cursor_node()?.g_cost)
    }
}

impl<T: Clone, C: Clone, G, H> Clone for RecursiveBestFirstTraversal<T, C, G, H> {
    fn clone(&self) -> Self {
        Self {
            generator: Rc::clone(&self.generator),
            heuristic: Rc::clone(&self.heuristic),
            levels: self.levels.clone(),
        }
    }
}

impl<T: Clone, C: Clone, G, H> Copyable for RecursiveBestFirstTraversal<T, C, G, H> {
    fn copy_of(&self) -> Self {
        self.clone()
    }
}
