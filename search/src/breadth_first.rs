//! Breadth-first traversal.
//!
//! The first goal reached is depth-optimal. Expanded nodes move into an
//! ancestor arena that is only read for path reconstruction. Each arena entry
//! counts its live children (frontier nodes or expanded entries below it) and
//! is freed together with every ancestor left at zero, so the arena holds
//! exactly the ancestors of the current frontier.

use std::rc::Rc;

use thicket_kernel::functor::{Expansion, NodeGenerator, Path};
use tracing::trace;

use crate::error::TraversalError;
use crate::queue::TwoStackQueue;
use crate::traversal::TreeTraversal;

#[derive(Debug, Clone)]
struct BfsNode<T> {
    value: T,
    /// Slot in the ancestor arena.
    parent: Option<usize>,
    depth: usize,
}

#[derive(Debug, Clone)]
struct Ancestor<T> {
    value: T,
    parent: Option<usize>,
    live_children: usize,
}

/// FIFO expansion over a [`TwoStackQueue`].
pub struct BreadthFirstTraversal<T, G> {
    generator: Rc<G>,
    ancestors: Vec<Option<Ancestor<T>>>,
    free: Vec<usize>,
    frontier: TwoStackQueue<BfsNode<T>>,
}

impl<T, G: NodeGenerator<T>> BreadthFirstTraversal<T, G> {
    /// Start at `root`.
    #[must_use]
    pub fn new(generator: G, root: T) -> Self {
        Self::from_shared(Rc::new(generator), root)
    }

    /// Start at `root` with a generator shared with other traversals.
    #[must_use]
    pub fn from_shared(generator: Rc<G>, root: T) -> Self {
        let mut frontier = TwoStackQueue::new();
        frontier.push(BfsNode {
            value: root,
            parent: None,
            depth: 0,
        });
        Self {
            generator,
            ancestors: Vec::new(),
            free: Vec::new(),
            frontier,
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

    /// Number of frontier nodes.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of expanded nodes kept for path reconstruction.
    #[must_use]
    pub fn ancestors_len(&self) -> usize {
        self.ancestors.len() - self.free.len()
    }

    fn store(&mut self, ancestor: Ancestor<T>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.ancestors[slot] = Some(ancestor);
                slot
            }
            None => {
                self.ancestors.push(Some(ancestor));
                self.ancestors.len() - 1
            }
        }
    }

    /// A child of `slot` is gone: free every ancestor left without children.
    /// Returns the number of freed entries.
    fn release_child(&mut self, slot: Option<usize>) -> usize {
        let mut freed = 0;
        let mut next = slot;
        while let Some(index) = next {
            let Some(entry) = self.ancestors.get_mut(index).and_then(Option::as_mut) else {
                break;
            };
            entry.live_children = entry.live_children.saturating_sub(1);
            if entry.live_children > 0 {
                break;
            }
            next = entry.parent;
            self.ancestors[index] = None;
            self.free.push(index);
            freed += 1;
        }
        freed
    }
}

impl<T, G: NodeGenerator<T>> TreeTraversal for BreadthFirstTraversal<T, G> {
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        let expansion = {
            let path = self.path()?;
            self.generator.expand(&path)
        };
        let Expansion::Successors(children) = expansion else {
            return Ok(false);
        };
        let Some(node) = self.frontier.pop() else {
            return Err(TraversalError::Empty);
        };
        if children.is_empty() {
            let freed = self.release_child(node.parent);
            trace!(depth = node.depth, freed, "dead end");
            return Ok(true);
        }
        let depth = node.depth + 1;
        let successors = children.len();
        let slot = self.store(Ancestor {
            value: node.value,
            parent: node.parent,
            live_children: successors,
        });
        for value in children {
            self.frontier.push(BfsNode {
                value,
                parent: Some(slot),
                depth,
            });
        }
        trace!(depth, successors, "expanded");
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        let node = self.frontier.pop().ok_or(TraversalError::Empty)?;
        self.release_child(node.parent);
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        self.frontier
            .peek()
            .map(|n| &n.value)
            .ok_or(TraversalError::Empty)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        let cursor = self.frontier.peek().ok_or(TraversalError::Empty)?;
        let mut chain = Vec::with_capacity(cursor.depth + 1);
        chain.push(&cursor.value);
        let mut parent = cursor.parent;
        while let Some(entry) = parent
            .and_then(|i| self.ancestors.get(i))
            .and_then(Option::as_ref)
        {
            chain.push(&entry.value);
            parent = entry.parent;
        }
        Path::from_leaf_first(chain).ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.frontier.peek().map(|n| n.depth)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(self.generator.is_goal(&self.path()?))
    }

    fn leaves(&self) -> Vec<&T> {
        self.frontier.iter().map(|n| &n.value).collect()
    }
}
