//! Search report: the deterministic record of one run.
//!
//! Reports are rendered to JSON by hand (explicit `"type"` tags, sorted
//! keys through [`canonical_json_bytes`]) so that the digest depends only on
//! what the run did, never on serde's enum representation.

use serde_json::{json, Value};
use thicket_kernel::memo::{CacheCounters, MemoStats};
use thicket_search::{SearchPolicyV1, SearchStatsV1};

use crate::canon::{canonical_json_bytes, canonical_json_of, CanonError};
use crate::digest::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY, DOMAIN_SEARCH_REPORT};

/// Report format tag embedded in every rendered report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// At least one goal was reported.
    GoalReached,
    /// The traversal emptied without a goal.
    FrontierExhausted,
    /// The expansion budget ran out first.
    ExpansionBudgetExceeded { limit: u64 },
}

impl TerminationReasonV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
        }
    }
}

/// A solution with nodes rendered by the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSolutionV1 {
    pub path: Vec<String>,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReportV1 {
    pub world_id: String,
    pub policy: SearchPolicyV1,
    pub termination: TerminationReasonV1,
    /// Goals in the order the driver reported them.
    pub solutions: Vec<RenderedSolutionV1>,
    pub stats: SearchStatsV1,
    /// Cache counters when the run was memoized.
    pub memo: Option<MemoStats>,
}

impl SearchReportV1 {
    /// Cost of the first reported solution.
    #[must_use]
    pub fn best_cost(&self) -> Option<u64> {
        self.solutions.first().map(|s| s.cost)
    }

    /// Render as a JSON value.
    ///
    /// # Errors
    ///
    /// [`CanonError::Serialize`] if the policy cannot be converted.
    pub fn to_json_value(&self) -> Result<Value, CanonError> {
        let solutions: Vec<Value> = self
            .solutions
            .iter()
            .map(|s| json!({"cost": s.cost, "path": s.path}))
            .collect();
        Ok(json!({
            "memo": self.memo.as_ref().map(memo_to_json),
            "policy": serde_json::to_value(&self.policy)?,
            "policy_digest": policy_digest(&self.policy)?.as_str(),
            "schema_version": REPORT_SCHEMA_VERSION,
            "solutions": solutions,
            "stats": serde_json::to_value(self.stats)?,
            "termination": termination_to_json(self.termination),
            "world_id": self.world_id,
        }))
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`].
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value()?)
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_SEARCH_REPORT,
            &self.to_canonical_json_bytes()?,
        ))
    }
}

/// Domain-separated digest of a policy's canonical JSON.
///
/// # Errors
///
/// Propagates [`CanonError`].
pub fn policy_digest(policy: &SearchPolicyV1) -> Result<ContentHash, CanonError> {
    Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &canonical_json_of(policy)?))
}

fn termination_to_json(reason: TerminationReasonV1) -> Value {
    match reason {
        TerminationReasonV1::ExpansionBudgetExceeded { limit } => {
            json!({"limit": limit, "type": reason.as_str()})
        }
        TerminationReasonV1::GoalReached | TerminationReasonV1::FrontierExhausted => {
            json!({"type": reason.as_str()})
        }
    }
}

fn counters_to_json(c: CacheCounters) -> Value {
    json!({"hits": c.hits, "misses": c.misses})
}

fn memo_to_json(stats: &MemoStats) -> Value {
    json!({
        "estimate": counters_to_json(stats.estimate),
        "expand": counters_to_json(stats.expand),
        "is_goal": counters_to_json(stats.is_goal),
        "transition_cost": counters_to_json(stats.transition_cost),
    })
}
