//! Exhaustive enumeration oracle.
//!
//! Walks every simple path from the world's root (no node value repeated on
//! a path), stopping at goals and terminal nodes exactly as the drivers do.
//! Only suitable for small worlds.
//!
//! # Panics
//!
//! Never in practice: the walked path always holds at least the root.

use thicket_harness::SearchWorldV1;
use thicket_kernel::functor::{Expansion, Path};

/// Every goal path with its cost, in depth-first order.
#[must_use]
pub fn goal_paths<T, W>(world: &W) -> Vec<(Vec<T>, u64)>
where
    T: Clone + PartialEq,
    W: SearchWorldV1<T>,
{
    let mut found = Vec::new();
    let mut path = vec![world.root()];
    walk(world, &mut path, world.root_cost(), &mut found);
    found
}

/// Cheapest goal cost, or `None` when no goal is reachable.
#[must_use]
pub fn cheapest_cost<T, W>(world: &W) -> Option<u64>
where
    T: Clone + PartialEq,
    W: SearchWorldV1<T>,
{
    goal_paths(world).into_iter().map(|(_, c)| c).min()
}

/// Number of goal paths tied at the cheapest cost.
#[must_use]
pub fn optimal_count<T, W>(world: &W) -> usize
where
    T: Clone + PartialEq,
    W: SearchWorldV1<T>,
{
    let all = goal_paths(world);
    let best = all.iter().map(|(_, c)| *c).min();
    all.iter().filter(|(_, c)| Some(*c) == best).count()
}

fn walk<T, W>(world: &W, path: &mut Vec<T>, cost: u64, found: &mut Vec<(Vec<T>, u64)>)
where
    T: Clone + PartialEq,
    W: SearchWorldV1<T>,
{
    let expansion = {
        let view = Path::from_root_first(path.iter().collect()).unwrap();
        if world.is_goal(&view) {
            found.push((path.clone(), cost));
            return;
        }
        world.expand(&view)
    };
    let Expansion::Successors(children) = expansion else {
        return;
    };
    for child in children {
        if path.contains(&child) {
            continue;
        }
        let step = world.transition_cost(path.last().unwrap(), &child);
        path.push(child);
        walk(world, path, cost + step, found);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn oracle_on_reference_worlds() {
        assert_eq!(cheapest_cost(&fixtures::reparenting_graph()), Some(8));
        assert_eq!(goal_paths(&fixtures::reparenting_graph()).len(), 2);
        assert_eq!(cheapest_cost(&fixtures::coin_unreachable()), None);
        assert_eq!(optimal_count(&fixtures::queens(4)), 2);
        assert_eq!(cheapest_cost(&fixtures::maze()), Some(8));
    }
}
