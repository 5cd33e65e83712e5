//! `Queens`: N-queens as a path-aware constraint problem.
//!
//! Row `r` is decided at depth `r + 1`. A candidate column is offered only
//! if it conflicts with none of the queens already on the path, so the node
//! value alone does not determine its successors.
//!
//! The same board is also a value domain: as a [`FiniteSetGenerator`] over
//! columns (row `r` takes the `r`-th value, each column used once) and as a
//! [`LevelGenerator`] proposing one row of [`QueensNode::Queen`] per level.

use thicket_kernel::functor::{
    CostFunction, Expansion, FiniteSetGenerator, Heuristic, LevelGenerator, NodeGenerator, Path,
};

use crate::contract::{SearchWorldV1, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueensNode {
    /// Empty board.
    Start,
    Queen { row: usize, col: usize },
}

impl QueensNode {
    fn attacks(self, row: usize, col: usize) -> bool {
        match self {
            Self::Start => false,
            Self::Queen { row: r, col: c } => {
                c == col || r.abs_diff(row) == c.abs_diff(col)
            }
        }
    }

    fn placed(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Queen { row, .. } => row + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Queens {
    size: usize,
}

impl Queens {
    /// # Errors
    ///
    /// [`WorldError::Invalid`] for a zero-sized board.
    pub fn new(size: usize) -> Result<Self, WorldError> {
        if size == 0 {
            return Err(WorldError::Invalid {
                detail: "board size must be positive".into(),
            });
        }
        Ok(Self { size })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl NodeGenerator<QueensNode> for Queens {
    fn expand(&self, path: &Path<'_, QueensNode>) -> Expansion<QueensNode> {
        let row = path.node().placed();
        if row == self.size {
            return Expansion::Terminal;
        }
        (0..self.size)
            .filter(|&col| !path.iter().any(|q| q.attacks(row, col)))
            .map(|col| QueensNode::Queen { row, col })
            .collect::<Vec<_>>()
            .into()
    }

    fn is_goal(&self, path: &Path<'_, QueensNode>) -> bool {
        path.node().placed() == self.size
    }
}

/// Columns, one per row. Distinct values rule out shared columns, leaving
/// only diagonals to check.
impl FiniteSetGenerator<usize> for Queens {
    fn values(&self) -> Vec<usize> {
        (0..self.size).collect()
    }

    fn max_path_len(&self) -> usize {
        self.size
    }

    fn is_valid_transition(&self, col: &usize, parent: Option<&Path<'_, usize>>) -> bool {
        let Some(parent) = parent else {
            return true;
        };
        let row = parent.len();
        parent
            .iter()
            .enumerate()
            .all(|(r, c)| r.abs_diff(row) != c.abs_diff(*col))
    }
}

impl LevelGenerator<QueensNode> for Queens {
    fn level_values(&self, parent: Option<&Path<'_, QueensNode>>) -> Vec<QueensNode> {
        let row = parent.map_or(0, Path::len);
        (0..self.size)
            .map(|col| QueensNode::Queen { row, col })
            .collect()
    }

    fn is_valid_transition(
        &self,
        queen: &QueensNode,
        parent: Option<&Path<'_, QueensNode>>,
    ) -> bool {
        let (Some(parent), QueensNode::Queen { row, col }) = (parent, *queen) else {
            return true;
        };
        !parent.iter().any(|q| q.attacks(row, col))
    }

    fn is_goal(&self, path: &Path<'_, QueensNode>) -> bool {
        path.len() == self.size
    }

    fn max_path_len(&self) -> Option<usize> {
        Some(self.size)
    }
}

impl CostFunction<QueensNode, u64> for Queens {
    fn transition_cost(&self, _from: &QueensNode, _to: &QueensNode) -> u64 {
        1
    }
}

impl Heuristic<QueensNode, u64> for Queens {
    fn estimate(&self, node: &QueensNode) -> u64 {
        self.size.saturating_sub(node.placed()) as u64
    }
}

impl SearchWorldV1<QueensNode> for Queens {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "queens"
    }

    fn root(&self) -> QueensNode {
        QueensNode::Start
    }

    fn node_is_state(&self) -> bool {
        false
    }

    fn render(&self, node: &QueensNode) -> String {
        match node {
            QueensNode::Start => "start".into(),
            QueensNode::Queen { row, col } => format!("{row}:{col}"),
        }
    }
}
