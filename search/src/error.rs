//! Typed search errors.
//!
//! `TraversalError` covers every failure a traversal or driver can surface at
//! runtime. `PolicyError` covers pre-flight validation of a
//! [`crate::policy::SearchPolicyV1`]; no traversal is built when it fires.

use thicket_kernel::cost::CostOverflow;
use thicket_kernel::functor::DefaultValuesUnsupported;

/// Failure of a traversal operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError {
    /// The operation needs a cursor but the frontier is exhausted.
    #[error("traversal is empty")]
    Empty,
    /// Construction from functor defaults failed.
    #[error(transparent)]
    DefaultValuesUnsupported(#[from] DefaultValuesUnsupported),
    /// Accumulated cost left the representable range.
    #[error(transparent)]
    CostOverflow(#[from] CostOverflow),
    /// A metered traversal was asked to expand past its budget.
    #[error("expansion budget of {limit} exhausted")]
    BudgetExhausted { limit: u64 },
}

/// A search policy is contradictory or unreadable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// `max_expansions` was set to zero.
    #[error("max_expansions must be positive")]
    ZeroBudget,
    /// A cost threshold was given for an algorithm that ignores it.
    #[error("cost_threshold is not used by algorithm {algorithm}")]
    UnusedThreshold { algorithm: &'static str },
    /// The JSON document did not parse as a policy.
    #[error("malformed policy: {detail}")]
    Malformed { detail: String },
}
