// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial partition buckets for the repulsion neighbor search.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use kurbo::Point;

/// One square cell of the spatial partition: the node positions currently
/// inside it, plus the indices of the regions whose contents are within one
/// cell (including this region itself).
///
/// The cell bounds are a convention enforced by the owning
/// [`LayoutState`](crate::LayoutState), not checked here; this is a plain
/// bucket whose only job is to bound the repulsion search radius. Adjacency
/// is lookup-only: a region never owns its neighbors.
#[derive(Clone)]
pub struct LayoutRegion<K> {
    entries: HashMap<K, Point>,
    adjacent: Vec<usize>,
}

impl<K: Copy + Eq + Hash + Debug> LayoutRegion<K> {
    /// Create an empty region adjacent to the given region indices.
    pub(crate) fn new(adjacent: Vec<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            adjacent,
        }
    }

    /// Record a node position in this region, replacing any previous entry.
    pub(crate) fn insert(&mut self, node: K, pos: Point) {
        self.entries.insert(node, pos);
    }

    /// Remove a node from this region.
    pub(crate) fn remove(&mut self, node: &K) {
        self.entries.remove(node);
    }

    /// Drop every entry, keeping adjacency intact.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of nodes currently bucketed here.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no node is bucketed here.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the `(node, position)` entries in this region.
    pub fn entries(&self) -> impl Iterator<Item = (K, Point)> + '_ {
        self.entries.iter().map(|(&k, &p)| (k, p))
    }

    /// Indices of the regions adjacent to this one, including itself, so
    /// "same or adjacent region" is a single loop for the caller.
    pub fn adjacent(&self) -> &[usize] {
        &self.adjacent
    }
}

impl<K: Copy + Eq + Hash + Debug> Debug for LayoutRegion<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRegion")
            .field("entries", &self.entries.len())
            .field("adjacent", &self.adjacent.len())
            .finish_non_exhaustive()
    }
}
