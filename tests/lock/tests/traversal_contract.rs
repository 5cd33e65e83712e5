//! Traversal contract tests: cursor/path/depth coherence at every step,
//! cost accounting, and the empty state, for every traversal.

use std::fmt::Debug;

use lock_tests::fixtures;
use thicket_harness::SearchWorldV1;
use thicket_kernel::functor::{Expansion, Path};
use thicket_search::{
    AStarTraversal, BreadthFirstTraversal, CostTreeTraversal, DepthFirstCostTraversal,
    DepthFirstTraversal, RecursiveBestFirstTraversal, TraversalError, TreeTraversal,
};

/// The cursor path starts at the root, its length matches the depth, and
/// every node is among the successors of its parent.
fn check_cursor<Tr, W>(tr: &Tr, world: &W)
where
    Tr: TreeTraversal,
    Tr::Node: Clone + PartialEq + Debug,
    W: SearchWorldV1<Tr::Node>,
{
    let path = tr.path().unwrap().to_vec();
    assert_eq!(path[0], world.root());
    assert_eq!(tr.depth(), Some(path.len() - 1));
    assert_eq!(tr.cursor().unwrap(), path.last().unwrap());
    for end in 1..path.len() {
        let prefix = Path::from_root_first(path[..end].iter().collect()).unwrap();
        let Expansion::Successors(children) = world.expand(&prefix) else {
            panic!("terminal node {:?} has a child on the cursor path", path[end - 1]);
        };
        assert!(
            children.contains(&path[end]),
            "{:?} is not a successor of {:?}",
            path[end],
            path[end - 1]
        );
    }
}

fn check_cost<Tr, W>(tr: &Tr, world: &W)
where
    Tr: CostTreeTraversal<Cost = u64>,
    Tr::Node: Clone,
    W: SearchWorldV1<Tr::Node>,
{
    let path = tr.path().unwrap().to_vec();
    let expected: u64 = world.root_cost()
        + path
            .windows(2)
            .map(|w| world.transition_cost(&w[0], &w[1]))
            .sum::<u64>();
    assert_eq!(*tr.cost().unwrap(), expected);
}

/// Step until empty or `limit` steps, checking the cursor each time.
fn walk_checked<Tr, W>(tr: &mut Tr, world: &W, limit: usize)
where
    Tr: TreeTraversal,
    Tr::Node: Clone + PartialEq + Debug,
    W: SearchWorldV1<Tr::Node>,
{
    for _ in 0..limit {
        if tr.is_empty() {
            return;
        }
        check_cursor(tr, world);
        if tr.is_goal().unwrap() || !tr.move_forward().unwrap() {
            tr.backtrack().unwrap();
        }
    }
}

fn assert_empty_is_sticky<Tr: TreeTraversal>(tr: &mut Tr)
where
    Tr::Node: Debug,
{
    for _ in 0..2 {
        assert!(tr.is_empty());
        assert_eq!(tr.depth(), None);
        assert!(tr.leaves().is_empty());
        assert_eq!(tr.cursor().unwrap_err(), TraversalError::Empty);
        assert_eq!(tr.path().unwrap_err(), TraversalError::Empty);
        assert_eq!(tr.is_goal().unwrap_err(), TraversalError::Empty);
        assert_eq!(tr.move_forward().unwrap_err(), TraversalError::Empty);
        assert_eq!(tr.backtrack().unwrap_err(), TraversalError::Empty);
    }
}

#[test]
fn depth_first_paths_are_coherent() {
    let coins = fixtures::coin_classic();
    let mut tr = DepthFirstTraversal::new(&coins, coins.root());
    walk_checked(&mut tr, &coins, 400);

    let maze = fixtures::maze();
    let mut tr = DepthFirstCostTraversal::new(&maze, maze.root(), 0u64);
    for _ in 0..200 {
        check_cursor(&tr, &maze);
        check_cost(&tr, &maze);
        tr.move_forward().unwrap();
    }
}

#[test]
fn breadth_first_paths_are_coherent_and_level_ordered() {
    let maze = fixtures::maze();
    let mut tr = BreadthFirstTraversal::new(&maze, maze.root());
    let mut last_depth = 0;
    for _ in 0..300 {
        let depth = tr.depth().unwrap();
        assert!(depth >= last_depth, "depth went from {last_depth} to {depth}");
        last_depth = depth;
        check_cursor(&tr, &maze);
        tr.move_forward().unwrap();
    }
}

#[test]
fn best_first_paths_are_coherent_and_priced() {
    let graph = fixtures::reparenting_graph();
    let mut tr = AStarTraversal::new(&graph, &graph, graph.root(), 0u64).unwrap();
    while !tr.is_empty() {
        check_cursor(&tr, &graph);
        check_cost(&tr, &graph);
        if tr.is_goal().unwrap() || !tr.move_forward().unwrap() {
            tr.backtrack().unwrap();
        }
    }
    assert_empty_is_sticky(&mut tr);

    let maze = fixtures::maze();
    let mut tr = RecursiveBestFirstTraversal::new(&maze, &maze, maze.root(), 0u64).unwrap();
    for _ in 0..200 {
        if tr.is_goal().unwrap() {
            break;
        }
        check_cursor(&tr, &maze);
        check_cost(&tr, &maze);
        tr.move_forward().unwrap();
    }
}

#[test]
fn exhausted_traversals_stay_empty() {
    let coins = fixtures::coin_unreachable();

    let mut dfs = DepthFirstCostTraversal::new(&coins, coins.root(), 0u64);
    walk_checked(&mut dfs, &coins, 10_000);
    assert_empty_is_sticky(&mut dfs);

    let mut bfs = BreadthFirstTraversal::new(&coins, coins.root());
    walk_checked(&mut bfs, &coins, 10_000);
    assert_empty_is_sticky(&mut bfs);

    let mut rbfs = RecursiveBestFirstTraversal::new(&coins, &coins, coins.root(), 0u64).unwrap();
    walk_checked(&mut rbfs, &coins, 10_000);
    assert_empty_is_sticky(&mut rbfs);
}

#[test]
fn backtracking_the_root_empties_everything() {
    let coins = fixtures::coin_classic();
    let mut tr = DepthFirstTraversal::new(&coins, coins.root());
    tr.backtrack().unwrap();
    assert_empty_is_sticky(&mut tr);

    let mut tr = AStarTraversal::new(&coins, &coins, coins.root(), 0u64).unwrap();
    tr.backtrack().unwrap();
    assert_empty_is_sticky(&mut tr);
}
