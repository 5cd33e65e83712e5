//! Binary that runs the reference worlds through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `<run>.<key>=<value>` lines on stdout. Logs go to stderr and are
//! filtered by `RUST_LOG`.

use std::error::Error;
use std::hash::Hash;

use lock_tests::fixtures;
use thicket_harness::report::policy_digest;
use thicket_harness::{run_search, SearchWorldV1};
use thicket_search::{AlgorithmV1, SearchPolicyV1};
use tracing_subscriber::EnvFilter;

fn policy(algorithm: AlgorithmV1, memoize: bool) -> SearchPolicyV1 {
    SearchPolicyV1 {
        algorithm,
        memoize,
        ..SearchPolicyV1::default()
    }
}

fn emit<T, W>(label: &str, world: &W, policy: &SearchPolicyV1) -> Result<(), Box<dyn Error>>
where
    T: Clone + Eq + Hash,
    W: SearchWorldV1<T>,
{
    let report = run_search(world, policy)?;
    println!("{label}.report_digest={}", report.digest()?);
    println!("{label}.policy_digest={}", policy_digest(policy)?);
    println!("{label}.termination={}", report.termination.as_str());
    match report.best_cost() {
        Some(cost) => println!("{label}.cost={cost}"),
        None => println!("{label}.cost=none"),
    }
    println!("{label}.solutions={}", report.solutions.len());
    println!("{label}.expansions={}", report.stats.expansions);
    println!("{label}.backtracks={}", report.stats.backtracks);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let coins = fixtures::coin_classic();
    emit("coin_greedy", &coins, &policy(AlgorithmV1::DepthFirst, false))?;
    emit("coin_bnb", &coins, &policy(AlgorithmV1::BranchAndBound, false))?;
    emit("coin_ida", &coins, &policy(AlgorithmV1::IterativeDeepeningCost, true))?;

    let maze = fixtures::maze();
    emit("maze_astar", &maze, &policy(AlgorithmV1::AStar, false))?;
    emit("maze_rbfs", &maze, &policy(AlgorithmV1::RecursiveBestFirst, true))?;

    let graph = fixtures::reparenting_graph();
    emit("graph_astar", &graph, &policy(AlgorithmV1::AStar, true))?;

    let queens = fixtures::queens(6);
    emit("queens_all", &queens, &policy(AlgorithmV1::FindAll, false))?;
    Ok(())
}
