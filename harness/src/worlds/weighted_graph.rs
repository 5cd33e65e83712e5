//! `WeightedGraph`: small explicit directed graph with named vertices.
//!
//! Vertices are numbered in order of first appearance in the edge list.
//! Estimates come from a table; vertices without an entry estimate zero.

use std::collections::HashMap;

use thicket_kernel::functor::{
    CostFunction, Expansion, Heuristic, NodeGenerator, NodeIsState, Path,
};

use crate::contract::{SearchWorldV1, WorldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGraph {
    names: Vec<String>,
    edges: Vec<Vec<(usize, u64)>>,
    estimates: Vec<u64>,
    start: usize,
    goal: usize,
}

impl WeightedGraph {
    /// Build from `(from, to, weight)` triples and `(vertex, estimate)` pairs.
    ///
    /// Successor order follows edge order.
    ///
    /// # Errors
    ///
    /// [`WorldError::Invalid`] if `start`, `goal` or an estimated vertex
    /// does not occur in any edge.
    pub fn from_edges(
        start: &str,
        goal: &str,
        edges: &[(&str, &str, u64)],
        estimates: &[(&str, u64)],
    ) -> Result<Self, WorldError> {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut names = Vec::new();
        let mut intern = |name: &str| -> usize {
            *ids.entry(name.to_string()).or_insert_with(|| {
                names.push(name.to_string());
                names.len() - 1
            })
        };
        let wired: Vec<(usize, usize, u64)> = edges
            .iter()
            .map(|&(from, to, weight)| (intern(from), intern(to), weight))
            .collect();

        let lookup = |name: &str| {
            ids.get(name).copied().ok_or_else(|| WorldError::Invalid {
                detail: format!("unknown vertex '{name}'"),
            })
        };
        let mut adjacency = vec![Vec::new(); names.len()];
        for (from, to, weight) in wired {
            adjacency[from].push((to, weight));
        }
        let mut table = vec![0; names.len()];
        for &(name, h) in estimates {
            table[lookup(name)?] = h;
        }
        Ok(Self {
            start: lookup(start)?,
            goal: lookup(goal)?,
            names,
            edges: adjacency,
            estimates: table,
        })
    }

    /// Vertex id for `name`.
    #[must_use]
    pub fn vertex(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn name(&self, vertex: usize) -> Option<&str> {
        self.names.get(vertex).map(String::as_str)
    }
}

impl NodeIsState for WeightedGraph {}

impl NodeGenerator<usize> for WeightedGraph {
    fn expand(&self, path: &Path<'_, usize>) -> Expansion<usize> {
        self.edges
            .get(*path.node())
            .map(|out| out.iter().map(|&(to, _)| to).collect::<Vec<_>>())
            .unwrap_or_default()
            .into()
    }

    fn is_goal(&self, path: &Path<'_, usize>) -> bool {
        *path.node() == self.goal
    }
}

impl CostFunction<usize, u64> for WeightedGraph {
    /// Weight of the first `from → to` edge; a missing edge costs `u64::MAX`.
    fn transition_cost(&self, from: &usize, to: &usize) -> u64 {
        self.edges
            .get(*from)
            .and_then(|out| out.iter().find(|(v, _)| v == to))
            .map_or(u64::MAX, |&(_, w)| w)
    }
}

impl Heuristic<usize, u64> for WeightedGraph {
    fn estimate(&self, node: &usize) -> u64 {
        self.estimates.get(*node).copied().unwrap_or(0)
    }
}

impl SearchWorldV1<usize> for WeightedGraph {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "weighted_graph"
    }

    fn root(&self) -> usize {
        self.start
    }

    fn render(&self, node: &usize) -> String {
        self.name(*node).map_or_else(|| format!("#{node}"), str::to_string)
    }
}
