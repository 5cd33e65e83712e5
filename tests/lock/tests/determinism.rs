//! In-process determinism: repeated runs of the same world and policy
//! produce byte-identical canonical reports.

use std::hash::Hash;

use lock_tests::fixtures;
use thicket_harness::{run_search, SearchWorldV1};
use thicket_search::{AlgorithmV1, SearchPolicyV1};

fn assert_repeatable<T, W>(world: &W, algorithms: &[AlgorithmV1])
where
    T: Clone + Eq + Hash,
    W: SearchWorldV1<T>,
{
    for &algorithm in algorithms {
        for memoize in [false, world.node_is_state()] {
            let policy = SearchPolicyV1 {
                algorithm,
                memoize,
                max_expansions: Some(2_000),
                ..SearchPolicyV1::default()
            };
            let first = run_search(world, &policy).unwrap();
            let bytes = first.to_canonical_json_bytes().unwrap();
            let digest = first.digest().unwrap();
            for _ in 0..3 {
                let again = run_search(world, &policy).unwrap();
                assert_eq!(again.to_canonical_json_bytes().unwrap(), bytes);
                assert_eq!(again.digest().unwrap(), digest);
            }
        }
    }
}

#[test]
fn reports_are_byte_identical_across_runs() {
    assert_repeatable(&fixtures::coin_classic(), &AlgorithmV1::ALL);
    assert_repeatable(&fixtures::maze(), &AlgorithmV1::ALL);
    assert_repeatable(&fixtures::reparenting_graph(), &AlgorithmV1::ALL);
    let value_free: Vec<AlgorithmV1> = AlgorithmV1::ALL
        .into_iter()
        .filter(|a| *a != AlgorithmV1::AStar)
        .collect();
    assert_repeatable(&fixtures::queens(5), &value_free);
}

#[test]
fn digests_distinguish_policies() {
    let coins = fixtures::coin_classic();
    let digest = |algorithm| {
        let policy = SearchPolicyV1 {
            algorithm,
            ..SearchPolicyV1::default()
        };
        run_search(&coins, &policy).unwrap().digest().unwrap()
    };
    let bnb = digest(AlgorithmV1::BranchAndBound);
    let astar = digest(AlgorithmV1::AStar);
    assert_ne!(bnb, astar);
    assert_eq!(bnb.algorithm(), "sha256");
}
