//! Functor contracts implemented by search domains.
//!
//! A domain never sees traversal internals. It is handed a [`Path`] (the
//! root-to-cursor chain of node values) and answers with successors, a goal
//! verdict, edge costs, or heuristic estimates.
//!
//! Constraint problems over a fixed value domain implement
//! [`FiniteSetGenerator`] or [`LevelGenerator`] instead of [`NodeGenerator`]:
//! the traversal proposes candidate values lazily and the domain only
//! validates them against the path so far.

use std::rc::Rc;

use crate::cost::Cost;

/// The functor cannot provide a default root node or root cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("functor provides no default {what}")]
pub struct DefaultValuesUnsupported {
    /// Which default is missing (`"root node"` or `"root cost"`).
    pub what: &'static str,
}

impl DefaultValuesUnsupported {
    /// Missing default root node.
    pub const ROOT_NODE: Self = Self { what: "root node" };
    /// Missing default root cost.
    pub const ROOT_COST: Self = Self { what: "root cost" };
}

/// Result of expanding a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion<T> {
    /// Successor values in expansion order. An empty list marks a dead end:
    /// the node is pruned together with any ancestor left without children.
    Successors(Vec<T>),
    /// The node is terminal. The traversal reports it and stays unchanged.
    Terminal,
}

impl<T> Expansion<T> {
    /// A dead end (no successors).
    #[must_use]
    pub fn dead_end() -> Self {
        Self::Successors(Vec::new())
    }

    /// Whether this is the terminal signal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl<T> From<Vec<T>> for Expansion<T> {
    fn from(successors: Vec<T>) -> Self {
        Self::Successors(successors)
    }
}

/// Borrowed view of the path from the root to the cursor.
///
/// Invariant: never empty. Index 0 is the root, the last element is the
/// cursor node.
#[derive(Debug)]
pub struct Path<'a, T> {
    nodes: Vec<&'a T>,
}

impl<T> Clone for Path<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<'a, T> Path<'a, T> {
    /// Build a path from root-first references.
    ///
    /// Returns `None` for an empty chain.
    #[must_use]
    pub fn from_root_first(nodes: Vec<&'a T>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    /// Build a path from references collected while walking parent links
    /// (cursor first).
    #[must_use]
    pub fn from_leaf_first(mut nodes: Vec<&'a T>) -> Option<Self> {
        nodes.reverse();
        Self::from_root_first(nodes)
    }

    /// The cursor node (last element).
    #[must_use]
    pub fn node(&self) -> &'a T {
        self.nodes[self.nodes.len() - 1]
    }

    /// The root node (first element).
    #[must_use]
    pub fn root(&self) -> &'a T {
        self.nodes[0]
    }

    /// The parent of the cursor, if the cursor is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<&'a T> {
        self.nodes.len().checked_sub(2).map(|i| self.nodes[i])
    }

    /// Number of nodes on the path (depth + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges from the root to the cursor.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Iterate root → cursor.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a T> + ExactSizeIterator + '_ {
        self.nodes.iter().copied()
    }

    /// Iterate cursor → root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.nodes.iter().rev().copied()
    }

    /// Clone the node values root-first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.nodes.iter().map(|n| (*n).clone()).collect()
    }
}

/// Expansion and goal test for a search domain.
pub trait NodeGenerator<T> {
    /// Produce the successors of the cursor of `path`.
    fn expand(&self, path: &Path<'_, T>) -> Expansion<T>;

    /// Whether the cursor of `path` is a solution.
    fn is_goal(&self, path: &Path<'_, T>) -> bool;

    /// Default root node for traversals built without an explicit root.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultValuesUnsupported`] unless overridden.
    fn default_root(&self) -> Result<T, DefaultValuesUnsupported> {
        Err(DefaultValuesUnsupported::ROOT_NODE)
    }
}

/// Edge cost between neighboring nodes.
pub trait CostFunction<T, C: Cost>: NodeGenerator<T> {
    /// Cost of the edge `from → to`.
    fn transition_cost(&self, from: &T, to: &T) -> C;

    /// Default root cost for traversals built without an explicit one.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultValuesUnsupported`] unless overridden.
    fn default_root_cost(&self) -> Result<C, DefaultValuesUnsupported> {
        Err(DefaultValuesUnsupported::ROOT_COST)
    }
}

/// Estimated remaining cost from a node to the nearest goal.
///
/// Best-first traversals return optimal solutions only when the estimate is
/// admissible (never overestimates). This is not checked.
pub trait Heuristic<T, C> {
    /// Estimate the remaining cost from `node`.
    fn estimate(&self, node: &T) -> C;
}

/// Marker for generators whose `expand` and `is_goal` answers depend only on
/// the cursor node value, never on its ancestors.
///
/// Caches keyed by node value (see [`crate::memo::Memoized`]) require it.
///
/// ```compile_fail
/// use thicket_kernel::functor::{Expansion, NodeGenerator, Path};
/// use thicket_kernel::memo::Memoized;
///
/// /// Successors depend on the whole path.
/// struct PathLength;
///
/// impl NodeGenerator<u8> for PathLength {
///     fn expand(&self, path: &Path<'_, u8>) -> Expansion<u8> {
///         Expansion::Successors(vec![u8::try_from(path.len()).unwrap_or(0)])
///     }
///
///     fn is_goal(&self, _path: &Path<'_, u8>) -> bool {
///         false
///     }
/// }
///
/// let memo: Memoized<PathLength, u8> = Memoized::new(PathLength);
/// let root = 0u8;
/// let path = Path::from_root_first(vec![&root]).unwrap();
/// let _ = memo.expand(&path);
/// ```
pub trait NodeIsState {}

/// Domain whose paths are sequences of distinct values drawn from one
/// finite set (permutations, tours, assignments).
///
/// The traversal tries the values in the order returned by
/// [`values`](Self::values), skipping those already on the path.
pub trait FiniteSetGenerator<T> {
    /// The value set, read once when a traversal is built.
    fn values(&self) -> Vec<T>;

    /// Number of nodes on a complete path. A cursor at this length is
    /// terminal.
    fn max_path_len(&self) -> usize;

    /// Whether `value` may extend `parent`. `parent` is `None` when `value`
    /// would be the root.
    fn is_valid_transition(&self, value: &T, parent: Option<&Path<'_, T>>) -> bool;

    /// Whether the cursor of `path` is a solution. Defaults to a complete
    /// path.
    fn is_goal(&self, path: &Path<'_, T>) -> bool {
        path.len() == self.max_path_len()
    }
}

/// Domain that proposes candidate values level by level, each level's
/// candidates computed from the path above it.
pub trait LevelGenerator<T> {
    /// Candidates for the node below `parent` (the root level when `None`),
    /// in the order they are tried.
    fn level_values(&self, parent: Option<&Path<'_, T>>) -> Vec<T>;

    /// Whether `value` may extend `parent`.
    fn is_valid_transition(&self, value: &T, parent: Option<&Path<'_, T>>) -> bool;

    /// Whether the cursor of `path` is a solution.
    fn is_goal(&self, path: &Path<'_, T>) -> bool;

    /// Number of nodes on a complete path; `None` leaves depth unbounded.
    fn max_path_len(&self) -> Option<usize> {
        None
    }

    /// When `true`, the first invalid candidate ends its level: candidates
    /// are ordered so that validity never returns once lost.
    fn stop_at_first_invalid(&self) -> bool {
        false
    }
}

/// The zero estimate. Always admissible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<T, C: Cost> Heuristic<T, C> for ZeroHeuristic {
    fn estimate(&self, _node: &T) -> C {
        C::zero()
    }
}

macro_rules! forward_functors {
    ($($ptr:ty),*) => {
        $(
            impl<T, G: NodeGenerator<T> + ?Sized> NodeGenerator<T> for $ptr {
                fn expand(&self, path: &Path<'_, T>) -> Expansion<T> {
                    (**self).expand(path)
                }

                fn is_goal(&self, path: &Path<'_, T>) -> bool {
                    (**self).is_goal(path)
                }

                fn default_root(&self) -> Result<T, DefaultValuesUnsupported> {
                    (**self).default_root()
                }
            }

            impl<T, C: Cost, G: CostFunction<T, C> + ?Sized> CostFunction<T, C> for $ptr {
                fn transition_cost(&self, from: &T, to: &T) -> C {
                    (**self).transition_cost(from, to)
                }

                fn default_root_cost(&self) -> Result<C, DefaultValuesUnsupported> {
                    (**self).default_root_cost()
                }
            }

            impl<T, C, G: Heuristic<T, C> + ?Sized> Heuristic<T, C> for $ptr {
                fn estimate(&self, node: &T) -> C {
                    (**self).estimate(node)
                }
            }

            impl<G: NodeIsState + ?Sized> NodeIsState for $ptr {}

            impl<T, G: FiniteSetGenerator<T> + ?Sized> FiniteSetGenerator<T> for $ptr {
                fn values(&self) -> Vec<T> {
                    (**self).values()
                }

                fn max_path_len(&self) -> usize {
                    (**self).max_path_len()
                }

                fn is_valid_transition(&self, value: &T, parent: Option<&Path<'_, T>>) -> bool {
                    (**self).is_valid_transition(value, parent)
                }

                fn is_goal(&self, path: &Path<'_, T>) -> bool {
                    (**self).is_goal(path)
                }
            }

            impl<T, G: LevelGenerator<T> + ?Sized> LevelGenerator<T> for $ptr {
                fn level_values(&self, parent: Option<&Path<'_, T>>) -> Vec<T> {
                    (**self).level_values(parent)
                }

                fn is_valid_transition(&self, value: &T, parent: Option<&Path<'_, T>>) -> bool {
                    (**self).is_valid_transition(value, parent)
                }

                fn is_goal(&self, path: &Path<'_, T>) -> bool {
                    (**self).is_goal(path)
                }

                fn max_path_len(&self) -> Option<usize> {
                    (**self).max_path_len()
                }

                fn stop_at_first_invalid(&self) -> bool {
                    (**self).stop_at_first_invalid()
                }
            }
        )*
    };
}

forward_functors!(&G, Rc<G>);
