//! `CoinChange`: fewest coins summing to a target.
//!
//! Denominations are decided one at a time, in the order given. A node
//! records how many denominations have been decided, the coins used and the
//! running total. Counts are tried largest first, so plain depth-first
//! search behaves like the greedy cashier and branch-and-bound finds the
//! minimum.

use thicket_kernel::functor::{
    CostFunction, DefaultValuesUnsupported, Expansion, Heuristic, NodeGenerator, NodeIsState,
    Path,
};

use crate::contract::{SearchWorldV1, WorldError};

/// Partial assignment of coin counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinNode {
    /// Index of the next denomination to decide.
    pub next: usize,
    /// Coins used so far.
    pub count: u32,
    /// Value of the coins used so far.
    pub total: u32,
}

impl CoinNode {
    pub const START: Self = Self {
        next: 0,
        count: 0,
        total: 0,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinChange {
    denominations: Vec<u32>,
    target: u32,
}

impl CoinChange {
    /// # Errors
    ///
    /// [`WorldError::Invalid`] for an empty denomination list or a zero
    /// denomination.
    pub fn new(denominations: Vec<u32>, target: u32) -> Result<Self, WorldError> {
        if denominations.is_empty() {
            return Err(WorldError::Invalid {
                detail: "no denominations".into(),
            });
        }
        if denominations.contains(&0) {
            return Err(WorldError::Invalid {
                detail: "zero denomination".into(),
            });
        }
        Ok(Self {
            denominations,
            target,
        })
    }

    #[must_use]
    pub fn denominations(&self) -> &[u32] {
        &self.denominations
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    fn remaining(&self, node: &CoinNode) -> u32 {
        self.target.saturating_sub(node.total)
    }
}

impl NodeIsState for CoinChange {}

impl NodeGenerator<CoinNode> for CoinChange {
    fn expand(&self, path: &Path<'_, CoinNode>) -> Expansion<CoinNode> {
        let node = path.node();
        if node.total == self.target {
            return Expansion::Terminal;
        }
        let Some(&coin) = self.denominations.get(node.next) else {
            return Expansion::dead_end();
        };
        let most = self.remaining(node) / coin;
        (0..=most)
            .rev()
            .map(|k| CoinNode {
                next: node.next + 1,
                count: node.count + k,
                total: node.total + k * coin,
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn is_goal(&self, path: &Path<'_, CoinNode>) -> bool {
        path.node().total == self.target
    }

    fn default_root(&self) -> Result<CoinNode, DefaultValuesUnsupported> {
        Ok(CoinNode::START)
    }
}

impl CostFunction<CoinNode, u64> for CoinChange {
    fn transition_cost(&self, from: &CoinNode, to: &CoinNode) -> u64 {
        u64::from(to.count.saturating_sub(from.count))
    }

    fn default_root_cost(&self) -> Result<u64, DefaultValuesUnsupported> {
        Ok(0)
    }
}

impl Heuristic<CoinNode, u64> for CoinChange {
    /// Remaining value divided by the largest undecided coin, rounded up.
    fn estimate(&self, node: &CoinNode) -> u64 {
        let remaining = self.remaining(node);
        match self.denominations.iter().skip(node.next).max() {
            Some(&largest) if remaining > 0 => u64::from(remaining.div_ceil(largest)),
            _ => 0,
        }
    }
}

impl SearchWorldV1<CoinNode> for CoinChange {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "coin_change"
    }

    fn root(&self) -> CoinNode {
        CoinNode::START
    }

    fn render(&self, node: &CoinNode) -> String {
        format!("coins={} total={}", node.count, node.total)
    }
}
