// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph abstraction consumed by the layout engine.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The engine's entire view of a graph: iterate all nodes, iterate a node's
/// neighbors. Edge direction is irrelevant to layout (the engine
/// symmetrizes whatever this trait reports), so directed graphs may report
/// either or both directions.
pub trait LayoutGraph {
    /// Opaque node key. The engine stores positions and velocities under
    /// this key, so it must be cheap to copy and hashable.
    type NodeId: Copy + Eq + Hash + Debug;

    /// Iterate every node in the graph.
    fn nodes(&self) -> Box<dyn Iterator<Item = Self::NodeId> + '_>;

    /// Iterate the neighbors of `node`. Duplicates are tolerated (the engine
    /// deduplicates); a node missing from the graph yields nothing.
    fn neighbors(&self, node: Self::NodeId) -> Box<dyn Iterator<Item = Self::NodeId> + '_>;
}

/// A minimal adjacency-list graph, mostly for tests, demos, and callers that
/// do not already have a graph type.
///
/// Storage is directed: `add_edge(a, b)` records `b` as a neighbor of `a`
/// only, which is sufficient because the engine symmetrizes.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyList<K> {
    adj: HashMap<K, Vec<K>>,
}

impl<K: Copy + Eq + Hash + Debug> AdjacencyList<K> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            adj: HashMap::new(),
        }
    }

    /// Add a node with no edges. Idempotent.
    pub fn add_node(&mut self, node: K) {
        self.adj.entry(node).or_default();
    }

    /// Add an edge from `a` to `b`, creating both endpoints as needed.
    /// Parallel edges collapse to one.
    pub fn add_edge(&mut self, a: K, b: K) {
        let out = self.adj.entry(a).or_default();
        if !out.contains(&b) {
            out.push(b);
        }
        self.adj.entry(b).or_default();
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// True if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }
}

impl<K: Copy + Eq + Hash + Debug> LayoutGraph for AdjacencyList<K> {
    type NodeId = K;

    fn nodes(&self) -> Box<dyn Iterator<Item = K> + '_> {
        Box::new(self.adj.keys().copied())
    }

    fn neighbors(&self, node: K) -> Box<dyn Iterator<Item = K> + '_> {
        Box::new(self.adj.get(&node).into_iter().flatten().copied())
    }
}

/// Build an undirected, deduplicated adjacency snapshot of `graph`.
///
/// Every node appears as a key (isolated nodes map to an empty list), and
/// every reported edge contributes both directions. Force computations are
/// inherently symmetric, so this is the view the engine works from.
pub(crate) fn undirected_adjacency<G: LayoutGraph>(
    graph: &G,
) -> HashMap<G::NodeId, Vec<G::NodeId>> {
    let mut adj: HashMap<G::NodeId, Vec<G::NodeId>> = HashMap::new();
    for n in graph.nodes() {
        adj.entry(n).or_default();
    }
    for n in graph.nodes() {
        for m in graph.neighbors(n) {
            if m == n {
                // Self-loops exert no layout force.
                continue;
            }
            let fwd = adj.entry(n).or_default();
            if !fwd.contains(&m) {
                fwd.push(m);
            }
            let rev = adj.entry(m).or_default();
            if !rev.contains(&n) {
                rev.push(n);
            }
        }
    }
    adj
}
