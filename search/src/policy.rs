//! Search policy types.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Which traversal and driver a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmV1 {
    /// Depth-first with cost, first goal (or first goal within
    /// `cost_threshold`).
    DepthFirst,
    /// Breadth-first, first goal.
    BreadthFirst,
    /// Depth-first branch-and-bound.
    BranchAndBound,
    /// Every optimal goal via depth-first enumeration.
    FindAll,
    /// A*, first goal.
    AStar,
    /// Recursive best-first search, first goal.
    RecursiveBestFirst,
    /// Depth-bounded iterative deepening.
    IterativeDeepening,
    /// Cost-bounded iterative deepening.
    IterativeDeepeningCost,
}

impl AlgorithmV1 {
    /// Every algorithm, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::DepthFirst,
        Self::BreadthFirst,
        Self::BranchAndBound,
        Self::FindAll,
        Self::AStar,
        Self::RecursiveBestFirst,
        Self::IterativeDeepening,
        Self::IterativeDeepeningCost,
    ];

    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DepthFirst => "depth_first",
            Self::BreadthFirst => "breadth_first",
            Self::BranchAndBound => "branch_and_bound",
            Self::FindAll => "find_all",
            Self::AStar => "a_star",
            Self::RecursiveBestFirst => "recursive_best_first",
            Self::IterativeDeepening => "iterative_deepening",
            Self::IterativeDeepeningCost => "iterative_deepening_cost",
        }
    }

    /// Whether `cost_threshold` affects this algorithm.
    #[must_use]
    pub fn uses_threshold(self) -> bool {
        matches!(self, Self::DepthFirst)
    }
}

/// Run configuration, loadable from JSON.
///
/// Missing fields take their [`Default`] values; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicyV1 {
    pub algorithm: AlgorithmV1,
    /// Hard cap on expansions; `None` is unbounded.
    pub max_expansions: Option<u64>,
    /// Cost above which the depth-first driver backtracks.
    pub cost_threshold: Option<u64>,
    /// Wrap the world in a memoizing decorator.
    pub memoize: bool,
}

impl SearchPolicyV1 {
    /// Parse and validate a JSON policy.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Malformed`] for unparseable input, otherwise whatever
    /// [`Self::validate`] reports.
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json).map_err(|e| PolicyError::Malformed {
            detail: e.to_string(),
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Compact JSON rendering.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Malformed`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, PolicyError> {
        serde_json::to_string(self).map_err(|e| PolicyError::Malformed {
            detail: e.to_string(),
        })
    }

    /// Reject contradictory settings.
    ///
    /// # Errors
    ///
    /// [`PolicyError::ZeroBudget`] for `max_expansions: 0`;
    /// [`PolicyError::UnusedThreshold`] for a threshold the algorithm ignores.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_expansions == Some(0) {
            return Err(PolicyError::ZeroBudget);
        }
        if self.cost_threshold.is_some() && !self.algorithm.uses_threshold() {
            return Err(PolicyError::UnusedThreshold {
                algorithm: self.algorithm.as_str(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmV1::DepthFirst,
            max_expansions: Some(100_000),
            cost_threshold: None,
            memoize: false,
        }
    }
}
