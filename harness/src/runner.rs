//! Harness runner: drives a world through one traversal and driver.
//!
//! # Pipeline
//!
//! ```text
//! validate policy → check world capabilities
//!   → [Memoized] → traversal → Metered → driver
//!   → termination reason → render solutions → SearchReportV1
//! ```
//!
//! The runner owns metering and report assembly; worlds only answer
//! functor queries.

use std::hash::Hash;
use std::rc::Rc;

use thicket_kernel::cost::Cost;
use thicket_kernel::functor::{
    CostFunction, Expansion, Heuristic, NodeGenerator, NodeIsState, Path,
};
use thicket_kernel::memo::Memoized;
use thicket_search::direct::{
    branch_and_bound, find_all_solutions, search_forward, search_forward_within, snapshot,
};
use thicket_search::iterative::{deepen_iteratively, deepen_iteratively_by_cost};
use thicket_search::{
    AStarTraversal, AlgorithmV1, BreadthFirstTraversal, CostTreeTraversal,
    DepthFirstCostTraversal, DepthFirstTraversal, Metered, PolicyError,
    RecursiveBestFirstTraversal, SearchPolicyV1, SearchStatsV1, Solution, TraversalError,
    TreeTraversal,
};
use tracing::info;

use crate::canon::CanonError;
use crate::contract::SearchWorldV1;
use crate::report::{RenderedSolutionV1, SearchReportV1, TerminationReasonV1};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),
    #[error("traversal failed: {0}")]
    Traversal(#[from] TraversalError),
    #[error("report rendering failed: {0}")]
    Canon(#[from] CanonError),
    /// The policy needs a capability the world does not have.
    #[error("world '{world_id}' cannot run {what}: nodes are not states")]
    Unsupported { world_id: String, what: &'static str },
}

fn unsupported<T, W: SearchWorldV1<T>>(world: &W, what: &'static str) -> RunError {
    RunError::Unsupported {
        world_id: world.world_id().to_string(),
        what,
    }
}

/// A world whose `node_is_state` flag has been checked, so that it may sit
/// behind a value-keyed cache.
struct StateKeyed<'w, W>(&'w W);

impl<'w, W> StateKeyed<'w, W> {
    fn checked<T>(world: &'w W) -> Option<Self>
    where
        W: SearchWorldV1<T>,
    {
        world.node_is_state().then_some(Self(world))
    }
}

impl<W> NodeIsState for StateKeyed<'_, W> {}

impl<T, W: NodeGenerator<T>> NodeGenerator<T> for StateKeyed<'_, W> {
    fn expand(&self, path: &Path<'_, T>) -> Expansion<T> {
        self.0.expand(path)
    }

    fn is_goal(&self, path: &Path<'_, T>) -> bool {
        self.0.is_goal(path)
    }
}

impl<T, C: Cost, W: CostFunction<T, C>> CostFunction<T, C> for StateKeyed<'_, W> {
    fn transition_cost(&self, from: &T, to: &T) -> C {
        self.0.transition_cost(from, to)
    }
}

impl<T, C, W: Heuristic<T, C>> Heuristic<T, C> for StateKeyed<'_, W> {
    fn estimate(&self, node: &T) -> C {
        self.0.estimate(node)
    }
}

/// What a driver produced before rendering.
struct Outcome<T> {
    termination: TerminationReasonV1,
    solutions: Vec<Solution<T, u64>>,
    stats: SearchStatsV1,
}

/// Run `world` under `policy` and build its report.
///
/// A budget running out is a normal outcome
/// ([`TerminationReasonV1::ExpansionBudgetExceeded`]), not an error.
///
/// # Errors
///
/// [`RunError::Policy`] for an invalid policy, [`RunError::Unsupported`]
/// when A* or memoization is requested for a path-aware world, and
/// [`RunError::Traversal`] for cost overflow.
pub fn run_search<T, W>(world: &W, policy: &SearchPolicyV1) -> Result<SearchReportV1, RunError>
where
    T: Clone + Eq + Hash,
    W: SearchWorldV1<T>,
{
    policy.validate()?;
    if policy.algorithm == AlgorithmV1::AStar && !world.node_is_state() {
        return Err(unsupported(world, "a_star"));
    }

    info!(
        world = world.world_id(),
        algorithm = policy.algorithm.as_str(),
        memoize = policy.memoize,
        "search started"
    );

    let root = world.root();
    let root_cost = world.root_cost();
    let (outcome, memo) = if policy.memoize {
        let keyed = StateKeyed::checked::<T>(world)
            .ok_or_else(|| unsupported(world, "memoized search"))?;
        let cached = Rc::new(Memoized::<_, T, u64>::new(keyed));
        let outcome = execute(&cached, root, root_cost, policy)?;
        (outcome, Some(cached.stats()))
    } else {
        (execute(&Rc::new(world), root, root_cost, policy)?, None)
    };

    let report = SearchReportV1 {
        world_id: world.world_id().to_string(),
        policy: policy.clone(),
        termination: outcome.termination,
        solutions: outcome
            .solutions
            .iter()
            .map(|s| RenderedSolutionV1 {
                path: s.path.iter().map(|n| world.render(n)).collect(),
                cost: s.cost,
            })
            .collect(),
        stats: outcome.stats,
        memo,
    };
    info!(
        world = world.world_id(),
        termination = report.termination.as_str(),
        solutions = report.solutions.len(),
        expansions = report.stats.expansions,
        "search finished"
    );
    Ok(report)
}

fn execute<T, G>(
    functors: &Rc<G>,
    root: T,
    root_cost: u64,
    policy: &SearchPolicyV1,
) -> Result<Outcome<T>, RunError>
where
    T: Clone + Eq + Hash,
    G: CostFunction<T, u64> + Heuristic<T, u64>,
{
    let budget = policy.max_expansions;
    let g = Rc::clone(functors);
    match policy.algorithm {
        AlgorithmV1::DepthFirst => {
            let tr = DepthFirstCostTraversal::from_shared(g, root, root_cost);
            drive(Metered::new(tr, budget), |tr| match policy.cost_threshold {
                Some(threshold) => {
                    if search_forward_within(tr, &threshold)? {
                        Ok(vec![snapshot(tr)?])
                    } else {
                        Ok(Vec::new())
                    }
                }
                None => first_goal(tr),
            })
        }
        AlgorithmV1::BreadthFirst => {
            let tr = BreadthFirstTraversal::from_shared(g, root);
            drive(Metered::new(tr, budget), |tr| {
                if !search_forward(tr)? {
                    return Ok(Vec::new());
                }
                let path = tr.path()?.to_vec();
                Ok(vec![priced_path(functors.as_ref(), root_cost, path)?])
            })
        }
        AlgorithmV1::BranchAndBound => {
            let tr = DepthFirstCostTraversal::from_shared(g, root, root_cost);
            drive(Metered::new(tr, budget), |tr| {
                Ok(branch_and_bound(tr)?.into_iter().collect())
            })
        }
        AlgorithmV1::FindAll => {
            let tr = DepthFirstCostTraversal::from_shared(g, root, root_cost);
            drive(Metered::new(tr, budget), find_all_solutions)
        }
        AlgorithmV1::AStar => {
            let tr = AStarTraversal::from_shared(g, Rc::clone(functors), root, root_cost)?;
            drive(Metered::new(tr, budget), first_goal)
        }
        AlgorithmV1::RecursiveBestFirst => {
            let tr =
                RecursiveBestFirstTraversal::from_shared(g, Rc::clone(functors), root, root_cost)?;
            drive(Metered::new(tr, budget), first_goal)
        }
        AlgorithmV1::IterativeDeepening => {
            let tr = DepthFirstTraversal::from_shared(g, root);
            drive(Metered::new(tr, budget), |tr| {
                deepen_iteratively(tr)?
                    .map(|path| priced_path(functors.as_ref(), root_cost, path))
                    .into_iter()
                    .collect()
            })
        }
        AlgorithmV1::IterativeDeepeningCost => {
            let tr = DepthFirstCostTraversal::from_shared(g, root, root_cost);
            drive(Metered::new(tr, budget), |tr| {
                Ok(deepen_iteratively_by_cost(tr)?.into_iter().collect())
            })
        }
    }
}

/// Run `driver` on a metered traversal and classify the result.
fn drive<Tr, F>(mut tr: Metered<Tr>, driver: F) -> Result<Outcome<Tr::Node>, RunError>
where
    Tr: TreeTraversal,
    F: FnOnce(&mut Metered<Tr>) -> Result<Vec<Solution<Tr::Node, u64>>, TraversalError>,
{
    let result = driver(&mut tr);
    let stats = tr.stats();
    let (termination, solutions) = match result {
        Ok(solutions) if solutions.is_empty() => {
            (TerminationReasonV1::FrontierExhausted, solutions)
        }
        Ok(solutions) => (TerminationReasonV1::GoalReached, solutions),
        Err(TraversalError::BudgetExhausted { limit }) => {
            (TerminationReasonV1::ExpansionBudgetExceeded { limit }, Vec::new())
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Outcome {
        termination,
        solutions,
        stats,
    })
}

fn first_goal<Tr>(tr: &mut Tr) -> Result<Vec<Solution<Tr::Node, Tr::Cost>>, TraversalError>
where
    Tr: CostTreeTraversal,
    Tr::Node: Clone,
{
    if search_forward(tr)? {
        Ok(vec![snapshot(tr)?])
    } else {
        Ok(Vec::new())
    }
}

/// Price a path found by a traversal that does not accumulate cost.
fn priced_path<T, G>(
    functors: &G,
    root_cost: u64,
    path: Vec<T>,
) -> Result<Solution<T, u64>, TraversalError>
where
    G: CostFunction<T, u64> + ?Sized,
{
    let mut cost = root_cost;
    for pair in path.windows(2) {
        cost = Cost::checked_add(&cost, &functors.transition_cost(&pair[0], &pair[1]))?;
    }
    Ok(Solution { path, cost })
}
