//! Depth-first traversals: uninformed backtracking and its cost-accumulating
//! sibling.
//!
//! Successors are explored leftmost-first. Both traversals are [`Copyable`],
//! which is what iterative deepening needs.

use std::rc::Rc;

use thicket_kernel::cost::{Cost, CostOverflow};
use thicket_kernel::functor::{CostFunction, Expansion, NodeGenerator, Path};
use tracing::trace;

use crate::error::TraversalError;
use crate::stack::NodeStack;
use crate::traversal::{Copyable, CostTreeTraversal, TreeTraversal};

/// Classic backtracking search without cost accounting.
pub struct DepthFirstTraversal<T, G> {
    generator: Rc<G>,
    stack: NodeStack<T, ()>,
}

impl<T, G: NodeGenerator<T>> DepthFirstTraversal<T, G> {
    /// Start at `root`.
    #[must_use]
    pub fn new(generator: G, root: T) -> Self {
        Self::from_shared(Rc::new(generator), root)
    }

    /// Start at `root` with a generator shared with other traversals.
    #[must_use]
    pub fn from_shared(generator: Rc<G>, root: T) -> Self {
        Self {
            generator,
            stack: NodeStack::with_root(root, ()),
        }
    }

    /// Start at the generator's default root.
    ///
    /// # Errors
    ///
    /// [`TraversalError::DefaultValuesUnsupported`] if the generator has none.
    pub fn from_defaults(generator: G) -> Result<Self, TraversalError> {
        let root = generator.default_root()?;
        Ok(Self::new(generator, root))
    }

    /// The shared generator.
    #[must_use]
    pub fn generator(&self) -> &Rc<G> {
        &self.generator
    }
}

impl<T, G: NodeGenerator<T>> TreeTraversal for DepthFirstTraversal<T, G> {
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        let expansion = {
            let path = self.stack.path().ok_or(TraversalError::Empty)?;
            self.generator.expand(&path)
        };
        let Expansion::Successors(children) = expansion else {
            return Ok(false);
        };
        if children.is_empty() {
            let pruned = self.stack.prune();
            trace!(pruned, "dead end");
        } else {
            let successors = self
                .stack
                .push_children(children.into_iter().map(|c| (c, ())).collect());
            trace!(depth = self.depth(), successors, "expanded");
        }
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        if self.stack.is_empty() {
            return Err(TraversalError::Empty);
        }
        let pruned = self.stack.prune();
        trace!(pruned, "backtrack");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        self.stack.top().map(|n| &n.value).ok_or(TraversalError::Empty)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        self.stack.path().ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.stack.top().map(|n| n.depth)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(self.generator.is_goal(&self.path()?))
    }

    fn leaves(&self) -> Vec<&T> {
        self.stack.leaves()
    }
}

impl<T: Clone, G> Clone for DepthFirstTraversal<T, G> {
    fn clone(&self) -> Self {
        Self {
            generator: Rc::clone(&self.generator),
            stack: self.stack.clone(),
        }
    }
}

impl<T: Clone, G> Copyable for DepthFirstTraversal<T, G> {
    fn copy_of(&self) -> Self {
        self.clone()
    }
}

/// Backtracking search that threads `parent cost + edge cost` into every
/// node. The base of threshold search and branch-and-bound.
pub struct DepthFirstCostTraversal<T, C, G> {
    generator: Rc<G>,
    stack: NodeStack<T, C>,
}

impl<T, C: Cost, G: CostFunction<T, C>> DepthFirstCostTraversal<T, C, G> {
    /// Start at `root` with accumulated cost `root_cost`.
    #[must_use]
    pub fn new(generator: G, root: T, root_cost: C) -> Self {
        Self::from_shared(Rc::new(generator), root, root_cost)
    }

    /// Start at `root` with a generator shared with other traversals.
    #[must_use]
    pub fn from_shared(generator: Rc<G>, root: T, root_cost: C) -> Self {
        Self {
            generator,
            stack: NodeStack::with_root(root, root_cost),
        }
    }

    /// Start at the generator's default root and root cost.
    ///
    /// # Errors
    ///
    /// [`TraversalError::DefaultValuesUnsupported`] if either default is
    /// missing.
    pub fn from_defaults(generator: G) -> Result<Self, TraversalError> {
        let root = generator.default_root()?;
        let root_cost = generator.default_root_cost()?;
        Ok(Self::new(generator, root, root_cost))
    }

    /// The shared generator.
    #[must_use]
    pub fn generator(&self) -> &Rc<G> {
        &self.generator
    }

    /// Expand the top node and price its successors without mutating.
    fn priced_expansion(&self) -> Result<Option<Vec<(T, C)>>, TraversalError> {
        let path = self.stack.path().ok_or(TraversalError::Empty)?;
        let top = self.stack.top().ok_or(TraversalError::Empty)?;
        let Expansion::Successors(children) = self.generator.expand(&path) else {
            return Ok(None);
        };
        let priced = children
            .into_iter()
            .map(|child| {
                let edge = self.generator.transition_cost(&top.value, &child);
                let cost = top.extra.checked_add(&edge)?;
                Ok((child, cost))
            })
            .collect::<Result<Vec<_>, CostOverflow>>()?;
        Ok(Some(priced))
    }
}

impl<T, C: Cost, G: CostFunction<T, C>> TreeTraversal for DepthFirstCostTraversal<T, C, G> {
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        let Some(children) = self.priced_expansion()? else {
            return Ok(false);
        };
        if children.is_empty() {
            let pruned = self.stack.prune();
            trace!(pruned, "dead end");
        } else {
            let successors = self.stack.push_children(children);
            trace!(depth = self.depth(), successors, "expanded");
        }
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        if self.stack.is_empty() {
            return Err(TraversalError::Empty);
        }
        let pruned = self.stack.prune();
        trace!(pruned, "backtrack");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        self.stack.top().map(|n| &n.value).ok_or(TraversalError::Empty)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        self.stack.path().ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.stack.top().map(|n| n.depth)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(self.generator.is_goal(&self.path()?))
    }

    fn leaves(&self) -> Vec<&T> {
        self.stack.leaves()
    }
}

impl<T, C: Cost, G: CostFunction<T, C>> CostTreeTraversal for DepthFirstCostTraversal<T, C, G> {
    type Cost = C;

    fn cost(&self) -> Result<&C, TraversalError> {
        self.stack.top().map(|n| &n.extra).ok_or(TraversalError::Empty)
    }
}

impl<T: Clone, C: Clone, G> Clone for DepthFirstCostTraversal<T, C, G> {
    fn clone(&self) -> Self {
        Self {
            generator: Rc::clone(&self.generator),
            stack: self.stack.clone(),
        }
    }
}

impl<T: Clone, C: Clone, G> Copyable for DepthFirstCostTraversal<T, C, G> {
    fn copy_of(&self) -> Self {
        self.clone()
    }
}
