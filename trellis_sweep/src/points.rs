// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad-phase + narrow-phase distance queries over tagged 2-D points.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use kurbo::Point;

use crate::interval::{Interval, intersecting_pairs};

/// An unordered pair of points found within the distance cutoff.
///
/// `a` and `b` are the keys as given in the input slice, together with their
/// positions and the exact Euclidean distance between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NearPair<K> {
    /// First key of the pair (the one earlier in the input slice).
    pub a: K,
    /// Second key of the pair.
    pub b: K,
    /// Position of `a`.
    pub a_pos: Point,
    /// Position of `b`.
    pub b_pos: Point,
    /// Exact Euclidean distance between the two positions.
    pub distance: f64,
}

/// Report every unordered pair of keys whose points lie within `max_dist` of
/// each other (inclusive).
///
/// Broad phase: each point projects to an x-interval and a y-interval of
/// half-width `max_dist / 2`, so two projections overlap exactly when the
/// coordinates differ by at most `max_dist`. The sweep in
/// [`intersecting_pairs`] runs once per axis and a pair survives only if it
/// appears on both axes. Narrow phase: the exact distance check.
///
/// A key is never paired with itself; the guard is on key equality rather
/// than position, so two distinct keys at the same coordinates are reported
/// (at distance 0). Keys in the input slice are expected to be unique.
pub fn pairs_within_distance<K: Copy + PartialEq>(
    points: &[(K, Point)],
    max_dist: f64,
) -> Vec<NearPair<K>> {
    let half = max_dist / 2.0;
    let xs: Vec<Interval> = points
        .iter()
        .map(|(_, p)| Interval::new(p.x - half, p.x + half))
        .collect();
    let ys: Vec<Interval> = points
        .iter()
        .map(|(_, p)| Interval::new(p.y - half, p.y + half))
        .collect();

    // Pairs from `intersecting_pairs` are already normalized (lo, hi), so a
    // plain set intersection gives the candidates overlapping on both axes.
    let x_pairs: BTreeSet<(usize, usize)> = intersecting_pairs(&xs).into_iter().collect();
    let y_pairs: BTreeSet<(usize, usize)> = intersecting_pairs(&ys).into_iter().collect();

    let mut out = Vec::new();
    for &(i, j) in x_pairs.intersection(&y_pairs) {
        let (ka, pa) = points[i];
        let (kb, pb) = points[j];
        if ka == kb {
            continue;
        }
        let distance = pa.distance(pb);
        if distance <= max_dist {
            out.push(NearPair {
                a: ka,
                b: kb,
                a_pos: pa,
                b_pos: pb,
                distance,
            });
        }
    }
    out
}
