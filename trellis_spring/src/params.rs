// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulation parameters.

use std::collections::HashSet;
use std::hash::Hash;

/// Tunables for one layout session.
///
/// Immutable while an iteration is in flight, reconfigurable between
/// iterations. Most defaults derive from a single `distance_scale` so the
/// simulation can be retuned for a differently sized coordinate space with
/// one knob; see [`SpringLayoutParams::with_distance_scale`].
///
/// Parameters are not validated. Physically nonsensical values (negative
/// natural length, zero time step, ...) are the caller's responsibility and
/// produce undefined layout behavior, though never a panic.
#[derive(Clone, Debug)]
pub struct SpringLayoutParams<K> {
    /// Characteristic length of the layout, from which the other distance
    /// defaults derive.
    pub distance_scale: f64,
    /// Rest length of every edge spring.
    pub natural_length: f64,
    /// Hooke stiffness of every edge spring.
    pub spring_constant: f64,
    /// Magnitude of the constant centering pull toward the origin.
    pub global_attraction: f64,
    /// Distance from the origin beyond which the centering pull applies.
    /// Inside this radius the local layout is left undistorted.
    pub global_force_cutoff: f64,
    /// Coefficient of the inverse-square pairwise repulsion.
    pub repulsive_constant: f64,
    /// Velocity damping factor applied every step, `0 < damping < 1` for a
    /// simulation that settles.
    pub damping: f64,
    /// Integration time step.
    pub time_step: f64,
    /// Speed cap applied after damping.
    pub max_speed: f64,
    /// Force-magnitude cap. The effective cap shrinks further for
    /// high-degree hub nodes; see [`SpringLayout::iterate`](crate::SpringLayout::iterate).
    pub max_force: f64,
    /// Minimum distance used in force denominators to avoid division by zero.
    pub min_dist: f64,
    /// Repulsion cutoff radius. Also the side length of one spatial region
    /// cell, so the repulsion search never looks past adjacent cells.
    pub max_repulsion_dist: f64,
    /// Half-width of the region grid in cells: the grid is
    /// `(2 * grid_radius + 1)²` cells centered on the origin, plus the outer
    /// catch-all region.
    pub grid_radius: usize,
    /// Nodes exempt from force, velocity, and position updates. Read fresh
    /// each iteration, so pinning mid-session (e.g. for a drag) is fine.
    pub pinned: HashSet<K>,
}

impl<K: Eq + Hash> SpringLayoutParams<K> {
    /// Parameters for the default distance scale of 50.
    pub fn new() -> Self {
        Self::with_distance_scale(50.0)
    }

    /// Derive a parameter set from a characteristic distance scale.
    ///
    /// The natural spring length is half the scale; repulsion strength grows
    /// with the square of the scale so relative node spacing is preserved
    /// under rescaling.
    pub fn with_distance_scale(scale: f64) -> Self {
        Self {
            distance_scale: scale,
            natural_length: 0.5 * scale,
            spring_constant: 10.0,
            global_attraction: 0.5,
            global_force_cutoff: scale,
            repulsive_constant: scale * scale,
            damping: 0.7,
            time_step: 0.1,
            max_speed: 10.0 * scale,
            max_force: 20.0 * scale,
            min_dist: 0.01 * scale,
            max_repulsion_dist: 2.0 * scale,
            grid_radius: 5,
            pinned: HashSet::new(),
        }
    }

    /// Pin a node, freezing it at its current position until unpinned.
    pub fn pin(&mut self, node: K) {
        self.pinned.insert(node);
    }

    /// Unpin a node, letting forces move it again.
    pub fn unpin(&mut self, node: &K) {
        self.pinned.remove(node);
    }

    /// Whether a node is currently pinned.
    pub fn is_pinned(&self, node: &K) -> bool {
        self.pinned.contains(node)
    }
}

impl<K: Eq + Hash> Default for SpringLayoutParams<K> {
    fn default() -> Self {
        Self::new()
    }
}
