// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session simulation state: positions, velocities, and the region grid.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use kurbo::{Point, Vec2};

use crate::region::LayoutRegion;

/// Everything the simulation carries across iterations.
///
/// The state is the single source of truth for node positions and
/// velocities. Entries materialize lazily the first time a node is seen and
/// are never removed by the engine; nodes deleted from the graph simply leave
/// orphaned entries behind, and pruning them (if memory matters) is the
/// caller's concern.
///
/// The region grid is built lazily on the first [`LayoutState::rebucket`]
/// call and rebuilt whenever the cell size or radius changes. Regions are
/// cleared and repopulated from scratch every iteration, an O(nodes)
/// reassignment that sidesteps incremental-update bugs entirely.
#[derive(Clone)]
pub struct LayoutState<K> {
    positions: HashMap<K, Point>,
    velocities: HashMap<K, Vec2>,
    grid: Option<RegionGrid<K>>,
}

impl<K: Copy + Eq + Hash + Debug> Default for LayoutState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> LayoutState<K> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            velocities: HashMap::new(),
            grid: None,
        }
    }

    /// The current position of a node, if one has been assigned.
    pub fn position(&self, node: K) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    /// Assign a node's position, creating the entry if absent.
    pub fn set_position(&mut self, node: K, pos: Point) {
        self.positions.insert(node, pos);
    }

    /// The current velocity of a node, if one has been assigned.
    pub fn velocity(&self, node: K) -> Option<Vec2> {
        self.velocities.get(&node).copied()
    }

    /// Assign a node's velocity, creating the entry if absent.
    pub fn set_velocity(&mut self, node: K, vel: Vec2) {
        self.velocities.insert(node, vel);
    }

    /// Iterate all known `(node, position)` entries.
    pub fn positions(&self) -> impl Iterator<Item = (K, Point)> + '_ {
        self.positions.iter().map(|(&k, &p)| (k, p))
    }

    /// Number of nodes with a position entry.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if no node has a position entry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Drop all positions, velocities, and the grid, as if freshly created.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.grid = None;
    }

    /// Materialize a zero velocity entry if the node has none. Never
    /// overwrites an existing entry.
    pub(crate) fn ensure_velocity(&mut self, node: K) {
        self.velocities.entry(node).or_insert(Vec2::ZERO);
    }

    /// Clear every region (including the outer catch-all) and reinsert every
    /// known position into the region whose cell contains it.
    ///
    /// The grid is `(2 * radius + 1)²` square cells of side `cell_size`
    /// centered on the origin of layout space, plus one outer region that
    /// absorbs positions beyond the covered span. Rebuilds the grid if
    /// `cell_size` or `radius` differs from the previous call.
    pub fn rebucket(&mut self, cell_size: f64, radius: usize) {
        let grid = match &mut self.grid {
            Some(g) if g.cell_size == cell_size && g.radius == radius => g,
            g => g.insert(RegionGrid::new(radius, cell_size)),
        };
        for region in &mut grid.regions {
            region.clear();
        }
        for (&node, &pos) in &self.positions {
            let idx = grid.index_for(pos);
            grid.regions[idx].insert(node, pos);
        }
    }

    /// Index of the region whose cell contains `pos`, or the outer region.
    /// Meaningful only after a [`LayoutState::rebucket`] call; returns `None`
    /// if the grid has never been built.
    pub(crate) fn region_of(&self, pos: Point) -> Option<usize> {
        self.grid.as_ref().map(|g| g.index_for(pos))
    }

    /// The region at `index`, if the grid exists.
    pub fn region(&self, index: usize) -> Option<&LayoutRegion<K>> {
        self.grid.as_ref().and_then(|g| g.regions.get(index))
    }

    /// Iterate `(node, position)` entries of the region at `index` and every
    /// region adjacent to it. Empty if the grid has never been built.
    pub(crate) fn neighborhood(&self, index: usize) -> impl Iterator<Item = (K, Point)> + '_ {
        self.grid
            .as_ref()
            .into_iter()
            .flat_map(move |g| {
                g.regions[index]
                    .adjacent()
                    .iter()
                    .flat_map(move |&i| g.regions[i].entries())
            })
    }

    /// Index of the outer catch-all region, if the grid exists.
    pub fn outer_region_index(&self) -> Option<usize> {
        self.grid.as_ref().map(RegionGrid::outer_index)
    }
}

impl<K: Copy + Eq + Hash + Debug> Debug for LayoutState<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutState")
            .field("positions", &self.positions.len())
            .field("velocities", &self.velocities.len())
            .field("grid", &self.grid.as_ref().map(|g| g.regions.len()))
            .finish_non_exhaustive()
    }
}

/// The square grid of regions plus the outer catch-all at the last index.
#[derive(Clone)]
struct RegionGrid<K> {
    radius: usize,
    cell_size: f64,
    /// Row-major `(2 * radius + 1)²` cells, then the outer region.
    regions: Vec<LayoutRegion<K>>,
}

impl<K: Copy + Eq + Hash + Debug> RegionGrid<K> {
    fn new(radius: usize, cell_size: f64) -> Self {
        let side = 2 * radius + 1;
        let outer = side * side;
        let mut regions = Vec::with_capacity(outer + 1);
        for iy in 0..side {
            for ix in 0..side {
                let mut adjacent = Vec::new();
                for dy in -1_i64..=1 {
                    for dx in -1_i64..=1 {
                        let jx = ix as i64 + dx;
                        let jy = iy as i64 + dy;
                        if (0..side as i64).contains(&jx) && (0..side as i64).contains(&jy) {
                            adjacent.push((jy * side as i64 + jx) as usize);
                        }
                    }
                }
                // Boundary cells can see past the covered span, so outliers
                // in the outer region still repel them.
                if ix == 0 || iy == 0 || ix == side - 1 || iy == side - 1 {
                    adjacent.push(outer);
                }
                regions.push(LayoutRegion::new(adjacent));
            }
        }
        let mut outer_adjacent = vec![outer];
        for iy in 0..side {
            for ix in 0..side {
                if ix == 0 || iy == 0 || ix == side - 1 || iy == side - 1 {
                    outer_adjacent.push(iy * side + ix);
                }
            }
        }
        regions.push(LayoutRegion::new(outer_adjacent));
        Self {
            radius,
            cell_size,
            regions,
        }
    }

    fn outer_index(&self) -> usize {
        self.regions.len() - 1
    }

    /// Map a position to its region index by floor-dividing the offset from
    /// the grid's negative extent by the cell size. The center cell spans
    /// `±cell_size / 2`, keeping the odd-width grid symmetric about the
    /// origin. Out-of-span positions map to the outer region.
    fn index_for(&self, pos: Point) -> usize {
        let side = 2 * self.radius + 1;
        let min = -(self.radius as f64 + 0.5) * self.cell_size;
        let ix = ((pos.x - min) / self.cell_size).floor();
        let iy = ((pos.y - min) / self.cell_size).floor();
        if ix < 0.0 || iy < 0.0 || ix >= side as f64 || iy >= side as f64 {
            return self.outer_index();
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bounds checked against the grid side just above"
        )]
        {
            iy as usize * side + ix as usize
        }
    }
}
