//! Memoization acceptance: wrapping a world in the caching decorator never
//! changes what a search does, only how often the world is consulted.

use std::hash::Hash;

use lock_tests::fixtures;
use thicket_harness::worlds::CoinNode;
use thicket_harness::{run_search, SearchWorldV1};
use thicket_kernel::memo::Memoized;
use thicket_search::direct::find_all_solutions;
use thicket_search::{AlgorithmV1, DepthFirstCostTraversal, SearchPolicyV1};

fn assert_transparent<T, W>(world: &W, algorithms: &[AlgorithmV1])
where
    T: Clone + Eq + Hash,
    W: SearchWorldV1<T>,
{
    for &algorithm in algorithms {
        let plain = SearchPolicyV1 {
            algorithm,
            max_expansions: Some(5_000),
            ..SearchPolicyV1::default()
        };
        let cached = SearchPolicyV1 {
            memoize: true,
            ..plain.clone()
        };
        let a = run_search(world, &plain).unwrap();
        let b = run_search(world, &cached).unwrap();
        let what = algorithm.as_str();
        assert_eq!(a.termination, b.termination, "{what}");
        assert_eq!(a.solutions, b.solutions, "{what}");
        assert_eq!(a.stats, b.stats, "{what}");
        assert!(a.memo.is_none());
        assert!(b.memo.is_some());
    }
}

#[test]
fn memoized_runs_match_plain_runs() {
    assert_transparent(&fixtures::coin_classic(), &AlgorithmV1::ALL);
    assert_transparent(&fixtures::reparenting_graph(), &AlgorithmV1::ALL);
    assert_transparent(&fixtures::maze(), &AlgorithmV1::ALL);
}

#[test]
fn repeated_expansions_hit_the_cache() {
    let maze = fixtures::maze();
    let policy = SearchPolicyV1 {
        algorithm: AlgorithmV1::IterativeDeepeningCost,
        memoize: true,
        ..SearchPolicyV1::default()
    };
    let report = run_search(&maze, &policy).unwrap();
    let memo = report.memo.unwrap();
    // Every round re-walks the shallower levels.
    assert!(memo.expand.hits > memo.expand.misses);
    assert!(memo.transition_cost.hits > 0);
}

#[test]
fn cache_serves_several_traversals() {
    let world = fixtures::coin_classic();
    let cached = Memoized::<_, CoinNode, u64>::new(&world);
    let mut first = DepthFirstCostTraversal::new(&cached, world.root(), 0u64);
    let before = find_all_solutions(&mut first).unwrap();
    let misses = cached.stats().expand.misses;
    let entries = cached.len();

    let mut second = DepthFirstCostTraversal::new(&cached, world.root(), 0u64);
    let after = find_all_solutions(&mut second).unwrap();
    assert_eq!(before, after);
    assert_eq!(cached.stats().expand.misses, misses);
    assert_eq!(cached.len(), entries);
    assert!(cached.stats().expand.hits >= misses);

    cached.clear();
    assert!(cached.is_empty());
}
