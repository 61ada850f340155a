// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`LayoutGraph`] for [`petgraph::Graph`].

use petgraph::EdgeType;
use petgraph::graph::{Graph, IndexType, NodeIndex};

use crate::graph::LayoutGraph;

/// Lay out a `petgraph::Graph` keyed by its node indices.
///
/// Neighbors are reported without regard to edge direction; the engine
/// symmetrizes and deduplicates anyway, so directed and multi-edge graphs
/// need no preprocessing.
///
/// Node indices are only stable while the graph is not mutated; removing
/// nodes between iterations invalidates indices, and the stale position
/// entries they leave in the state are the caller's to prune (as with any
/// key type).
impl<N, E, Ty: EdgeType, Ix: IndexType> LayoutGraph for Graph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;

    fn nodes(&self) -> Box<dyn Iterator<Item = Self::NodeId> + '_> {
        Box::new(self.node_indices())
    }

    fn neighbors(&self, node: Self::NodeId) -> Box<dyn Iterator<Item = Self::NodeId> + '_> {
        Box::new(self.neighbors_undirected(node))
    }
}
