//! Node stack shared by the depth-first traversals.
//!
//! The stack is its own arena: a node's index is its handle and a parent is
//! always stored below its children. Expanded nodes stay on the stack until
//! their last pending child is gone, so "the parent of the node just popped is
//! the new top" is exactly the zero-live-children test.

use std::collections::BTreeSet;

use thicket_kernel::functor::Path;

#[derive(Debug, Clone)]
pub(crate) struct StackNode<T, X> {
    pub(crate) value: T,
    pub(crate) parent: Option<usize>,
    pub(crate) depth: usize,
    /// Per-traversal payload: `()` or the accumulated cost.
    pub(crate) extra: X,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeStack<T, X> {
    nodes: Vec<StackNode<T, X>>,
}

impl<T, X> NodeStack<T, X> {
    pub(crate) fn with_root(value: T, extra: X) -> Self {
        Self {
            nodes: vec![StackNode {
                value,
                parent: None,
                depth: 0,
                extra,
            }],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn top(&self) -> Option<&StackNode<T, X>> {
        self.nodes.last()
    }

    /// Root-to-top path.
    pub(crate) fn path(&self) -> Option<Path<'_, T>> {
        let mut index = self.nodes.len().checked_sub(1)?;
        let mut chain = Vec::with_capacity(self.nodes[index].depth + 1);
        loop {
            let node = &self.nodes[index];
            chain.push(&node.value);
            match node.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        Path::from_leaf_first(chain)
    }

    /// Push the children of the top node so that the first child ends up on
    /// top. Returns the number pushed.
    pub(crate) fn push_children(&mut self, children: Vec<(T, X)>) -> usize {
        let Some(parent) = self.nodes.len().checked_sub(1) else {
            return 0;
        };
        let depth = self.nodes[parent].depth + 1;
        let count = children.len();
        self.nodes.extend(children.into_iter().rev().map(|(value, extra)| StackNode {
            value,
            parent: Some(parent),
            depth,
            extra,
        }));
        count
    }

    /// Pop the top node, then every ancestor it leaves without children.
    /// Returns the number of nodes removed.
    pub(crate) fn prune(&mut self) -> usize {
        let Some(mut popped) = self.nodes.pop() else {
            return 0;
        };
        let mut removed = 1;
        while let Some(parent) = popped.parent {
            if parent + 1 != self.nodes.len() {
                break;
            }
            let Some(next) = self.nodes.pop() else {
                break;
            };
            popped = next;
            removed += 1;
        }
        removed
    }

    /// Unexpanded nodes, top first.
    pub(crate) fn leaves(&self) -> Vec<&T> {
        let expanded: BTreeSet<usize> = self.nodes.iter().filter_map(|n| n.parent).collect();
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(i, _)| !expanded.contains(i))
            .map(|(_, n)| &n.value)
            .collect()
    }
}
