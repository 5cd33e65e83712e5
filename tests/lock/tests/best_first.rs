//! Best-first acceptance: A* re-parenting, RBFS and cost-bounded deepening
//! converge on the optimum found by exhaustive enumeration.

use lock_tests::{fixtures, oracle};
use thicket_harness::{run_search, SearchWorldV1, TerminationReasonV1};
use thicket_kernel::functor::ZeroHeuristic;
use thicket_search::direct::search_forward;
use thicket_search::iterative::deepen_iteratively_by_cost;
use thicket_search::{
    AStarTraversal, AlgorithmV1, CostTreeTraversal, DepthFirstCostTraversal,
    RecursiveBestFirstTraversal, SearchPolicyV1, TreeTraversal,
};

fn names(world: &impl SearchWorldV1<usize>, path: &[usize]) -> Vec<String> {
    path.iter().map(|v| world.render(v)).collect()
}

#[test]
fn astar_reparents_closed_node() {
    let graph = fixtures::reparenting_graph();
    let mut tr = AStarTraversal::new(&graph, &graph, graph.root(), 0u64).unwrap();
    assert!(search_forward(&mut tr).unwrap());
    assert_eq!(*tr.cost().unwrap(), 8);
    assert_eq!(
        names(&graph, &tr.path().unwrap().to_vec()),
        vec!["s", "b", "c", "g"]
    );
    assert_eq!(Some(8), oracle::cheapest_cost(&graph));
}

#[test]
fn best_first_algorithms_match_oracle_on_maze() {
    let maze = fixtures::maze();
    let optimum = oracle::cheapest_cost(&maze);
    assert_eq!(optimum, Some(8));
    for algorithm in [
        AlgorithmV1::AStar,
        AlgorithmV1::RecursiveBestFirst,
        AlgorithmV1::IterativeDeepeningCost,
        AlgorithmV1::BreadthFirst,
        AlgorithmV1::IterativeDeepening,
    ] {
        let policy = SearchPolicyV1 {
            algorithm,
            ..SearchPolicyV1::default()
        };
        let report = run_search(&maze, &policy).unwrap();
        assert_eq!(report.termination, TerminationReasonV1::GoalReached);
        assert_eq!(report.best_cost(), optimum, "{}", algorithm.as_str());
        assert_eq!(report.solutions[0].path.len(), 9);
    }
}

#[test]
fn zero_heuristic_degrades_to_uniform_cost() {
    let graph = fixtures::reparenting_graph();
    let mut tr = AStarTraversal::new(&graph, ZeroHeuristic, graph.root(), 0u64).unwrap();
    assert!(search_forward(&mut tr).unwrap());
    assert_eq!(*tr.cost().unwrap(), 8);

    let mut tr = RecursiveBestFirstTraversal::new(&graph, ZeroHeuristic, graph.root(), 0u64).unwrap();
    assert!(search_forward(&mut tr).unwrap());
    assert_eq!(*tr.cost().unwrap(), 8);
}

#[test]
fn rbfs_and_ida_agree_on_graph() {
    let graph = fixtures::reparenting_graph();
    let mut rbfs = RecursiveBestFirstTraversal::new(&graph, &graph, graph.root(), 0u64).unwrap();
    assert!(search_forward(&mut rbfs).unwrap());

    let dfs = DepthFirstCostTraversal::new(&graph, graph.root(), 0u64);
    let ida = deepen_iteratively_by_cost(&dfs).unwrap().unwrap();

    assert_eq!(*rbfs.cost().unwrap(), ida.cost);
    assert_eq!(rbfs.path().unwrap().to_vec(), ida.path);
    // The input traversal is untouched by the deepening rounds.
    assert_eq!(dfs.depth(), Some(0));
}

#[test]
fn nonzero_root_cost_is_carried() {
    let graph = fixtures::reparenting_graph();
    let mut tr = AStarTraversal::new(&graph, &graph, graph.root(), 100u64).unwrap();
    assert!(search_forward(&mut tr).unwrap());
    assert_eq!(*tr.cost().unwrap(), 108);
}
