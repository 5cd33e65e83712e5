//! Policy and budget acceptance: JSON policies drive the runner, budgets
//! stop unbounded searches deterministically, and contradictory settings
//! are rejected before any expansion.

use lock_tests::fixtures;
use thicket_harness::{run_search, RunError, TerminationReasonV1};
use thicket_search::{AlgorithmV1, PolicyError, SearchPolicyV1};

#[test]
fn json_policy_drives_the_runner() {
    let policy = SearchPolicyV1::from_json_str(
        r#"{"algorithm":"a_star","max_expansions":500,"memoize":true}"#,
    )
    .unwrap();
    let report = run_search(&fixtures::maze(), &policy).unwrap();
    assert_eq!(report.best_cost(), Some(8));
    assert_eq!(report.policy, policy);
    assert!(report.stats.expansions <= 500);
}

#[test]
fn cyclic_world_stops_on_budget() {
    let maze = fixtures::maze();
    for algorithm in [
        AlgorithmV1::BranchAndBound,
        AlgorithmV1::FindAll,
    ] {
        let policy = SearchPolicyV1 {
            algorithm,
            max_expansions: Some(300),
            ..SearchPolicyV1::default()
        };
        let report = run_search(&maze, &policy).unwrap();
        assert_eq!(
            report.termination,
            TerminationReasonV1::ExpansionBudgetExceeded { limit: 300 },
            "{}",
            algorithm.as_str()
        );
        assert_eq!(report.stats.expansions, 300);
        assert!(report.solutions.is_empty());
    }
}

#[test]
fn budget_covers_all_deepening_rounds() {
    let coins = fixtures::coin_classic();
    let unbounded = SearchPolicyV1 {
        algorithm: AlgorithmV1::IterativeDeepeningCost,
        max_expansions: None,
        ..SearchPolicyV1::default()
    };
    let full = run_search(&coins, &unbounded).unwrap();
    let needed = full.stats.expansions;
    assert!(needed > 1);

    let exact = SearchPolicyV1 {
        max_expansions: Some(needed),
        ..unbounded.clone()
    };
    assert_eq!(run_search(&coins, &exact).unwrap().best_cost(), Some(14));

    let short = SearchPolicyV1 {
        max_expansions: Some(needed - 1),
        ..unbounded
    };
    assert_eq!(
        run_search(&coins, &short).unwrap().termination,
        TerminationReasonV1::ExpansionBudgetExceeded { limit: needed - 1 }
    );
}

#[test]
fn threshold_search_respects_bound() {
    let coins = fixtures::coin_classic();
    let greedy = SearchPolicyV1 {
        algorithm: AlgorithmV1::DepthFirst,
        ..SearchPolicyV1::default()
    };
    assert_eq!(run_search(&coins, &greedy).unwrap().best_cost(), Some(16));

    let bounded = SearchPolicyV1 {
        cost_threshold: Some(14),
        ..greedy.clone()
    };
    assert_eq!(run_search(&coins, &bounded).unwrap().best_cost(), Some(14));

    let too_tight = SearchPolicyV1 {
        cost_threshold: Some(13),
        ..greedy
    };
    let report = run_search(&coins, &too_tight).unwrap();
    assert_eq!(report.termination, TerminationReasonV1::FrontierExhausted);
}

#[test]
fn contradictory_policies_rejected() {
    let coins = fixtures::coin_classic();
    let zero = SearchPolicyV1 {
        max_expansions: Some(0),
        ..SearchPolicyV1::default()
    };
    assert_eq!(
        run_search(&coins, &zero).unwrap_err(),
        RunError::Policy(PolicyError::ZeroBudget)
    );
    let stray = SearchPolicyV1 {
        algorithm: AlgorithmV1::BranchAndBound,
        cost_threshold: Some(3),
        ..SearchPolicyV1::default()
    };
    assert!(matches!(
        run_search(&coins, &stray),
        Err(RunError::Policy(PolicyError::UnusedThreshold { .. }))
    ));
}
