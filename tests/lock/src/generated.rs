//! Seeded random graphs for cross-checking drivers against the oracle.
//!
//! Vertices are named `v0 .. v{n-1}`; `v0` is the start and the last vertex
//! the goal. Estimates never exceed the true remaining cost but need not be
//! consistent.
//!
//! # Panics
//!
//! Generators panic for fewer than two vertices.

use rand::rngs::StdRng;
use rand::Rng;
use thicket_harness::worlds::WeightedGraph;

/// How estimates relate to the true remaining cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimates {
    Zero,
    Exact,
    /// Uniform in `0..=remaining`, drawn per vertex.
    Below,
}

impl Estimates {
    /// Rotate through the modes by seed.
    #[must_use]
    pub fn for_seed(seed: u64) -> Self {
        match seed % 3 {
            0 => Self::Zero,
            1 => Self::Exact,
            _ => Self::Below,
        }
    }
}

/// Acyclic: edges only run from lower to higher index.
#[must_use]
pub fn random_dag(rng: &mut StdRng, vertices: usize, estimates: Estimates) -> WeightedGraph {
    let edges = sample_edges(rng, vertices, 0.35, |from, to| from < to);
    build(rng, vertices, &edges, estimates)
}

/// Any edge except self-loops, so cycles are common.
#[must_use]
pub fn random_digraph(rng: &mut StdRng, vertices: usize, estimates: Estimates) -> WeightedGraph {
    let edges = sample_edges(rng, vertices, 0.25, |from, to| from != to);
    build(rng, vertices, &edges, estimates)
}

fn mentions(edges: &[(usize, usize, u64)], vertex: usize) -> bool {
    edges.iter().any(|&(a, b, _)| a == vertex || b == vertex)
}

fn sample_edges(
    rng: &mut StdRng,
    vertices: usize,
    density: f64,
    allowed: impl Fn(usize, usize) -> bool,
) -> Vec<(usize, usize, u64)> {
    assert!(vertices >= 2, "need a start and a distinct goal");
    let mut edges = Vec::new();
    for from in 0..vertices {
        for to in 0..vertices {
            if allowed(from, to) && rng.gen_bool(density) {
                edges.push((from, to, rng.gen_range(0..=5)));
            }
        }
    }
    let goal = vertices - 1;
    if !mentions(&edges, 0) || !mentions(&edges, goal) {
        edges.push((0, goal, rng.gen_range(0..=5)));
    }
    edges
}

/// Cheapest cost from every vertex to `goal`, `None` when unreachable.
fn remaining_costs(vertices: usize, edges: &[(usize, usize, u64)], goal: usize) -> Vec<Option<u64>> {
    let mut best = vec![None; vertices];
    best[goal] = Some(0);
    for _ in 0..vertices {
        for &(from, to, weight) in edges {
            if let Some(rest) = best[to] {
                let via = rest + weight;
                if !best[from].is_some_and(|b| b <= via) {
                    best[from] = Some(via);
                }
            }
        }
    }
    best
}

fn build(
    rng: &mut StdRng,
    vertices: usize,
    edges: &[(usize, usize, u64)],
    estimates: Estimates,
) -> WeightedGraph {
    let goal = vertices - 1;
    let remaining = remaining_costs(vertices, edges, goal);
    let names: Vec<String> = (0..vertices).map(|v| format!("v{v}")).collect();
    let wired: Vec<(&str, &str, u64)> = edges
        .iter()
        .map(|&(a, b, w)| (names[a].as_str(), names[b].as_str(), w))
        .collect();
    let table: Vec<(&str, u64)> = (0..vertices)
        .filter(|&v| mentions(edges, v))
        .map(|v| {
            let h = match (estimates, remaining[v]) {
                (Estimates::Zero, _) => 0,
                (Estimates::Exact, Some(rest)) => rest,
                (Estimates::Below, Some(rest)) => rng.gen_range(0..=rest),
                // Any estimate is admissible where the goal is unreachable.
                (_, None) => rng.gen_range(0..=10),
            };
            (names[v].as_str(), h)
        })
        .collect();
    WeightedGraph::from_edges(&names[0], &names[goal], &wired, &table).unwrap()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use thicket_harness::SearchWorldV1;
    use thicket_kernel::functor::Heuristic;

    use super::*;
    use crate::oracle;

    #[test]
    fn exact_estimates_equal_the_optimum() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = random_dag(&mut rng, 6, Estimates::Exact);
            if let Some(optimum) = oracle::cheapest_cost(&graph) {
                assert_eq!(graph.estimate(&graph.root()), optimum, "seed {seed}");
            }
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = random_digraph(&mut StdRng::seed_from_u64(7), 6, Estimates::Below);
        let b = random_digraph(&mut StdRng::seed_from_u64(7), 6, Estimates::Below);
        assert_eq!(a, b);
    }
}
