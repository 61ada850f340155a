// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep-line intersection over closed 1-D intervals.

use alloc::vec::Vec;

/// A closed interval `[min, max]` on the real line.
///
/// Degenerate intervals (`min == max`) are valid and can still intersect
/// neighbors that share the point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    /// Lower endpoint (inclusive).
    pub min: f64,
    /// Upper endpoint (inclusive).
    pub max: f64,
}

impl Interval {
    /// Create a new closed interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether this interval overlaps `other`, endpoints inclusive.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Endpoint event kind. `Begin` orders before `End` at equal coordinates,
/// which is what makes touching intervals register as intersecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Begin,
    End,
}

/// Report every unordered pair of intervals that intersect.
///
/// Pairs are index pairs into `intervals` with the smaller index first; no
/// pair is reported twice. Overlap is endpoint-inclusive: intervals that
/// merely touch (`a.max == b.min`) are reported. This is the deliberate
/// closed-interval convention, implemented by sorting begin events before end
/// events at equal coordinates.
///
/// Classic sweep-line: 2N endpoint events sorted by coordinate; a begin event
/// pairs the new interval against every currently active one, an end event
/// retires its interval. O(N log N + K) for K intersecting pairs.
pub fn intersecting_pairs(intervals: &[Interval]) -> Vec<(usize, usize)> {
    let mut events: Vec<(f64, EventKind, usize)> = Vec::with_capacity(intervals.len() * 2);
    for (i, iv) in intervals.iter().enumerate() {
        events.push((iv.min, EventKind::Begin, i));
        events.push((iv.max, EventKind::End, i));
    }
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for (_, kind, i) in events {
        match kind {
            EventKind::Begin => {
                for &j in &active {
                    pairs.push((i.min(j), i.max(j)));
                }
                active.push(i);
            }
            EventKind::End => {
                if let Some(pos) = active.iter().position(|&j| j == i) {
                    active.swap_remove(pos);
                }
            }
        }
    }
    pairs
}
