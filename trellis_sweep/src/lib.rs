// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Sweep: sweep-line interval intersection and broad-phase distance queries.
//!
//! Two building blocks, both pure algorithms with no graph semantics:
//!
//! - [`intersecting_pairs`] reports every pair of closed 1-D intervals that
//!   overlap, endpoints inclusive, via a classic sweep-line in
//!   O(N log N + K).
//! - [`pairs_within_distance`] finds every unordered pair of tagged 2-D points
//!   within a Euclidean cutoff by running the interval sweep independently on
//!   the x- and y-projections, intersecting the two candidate sets, and then
//!   applying an exact distance check.
//!
//! The second is the standard two-axis broad phase: it replaces an O(N²)
//! all-pairs scan with a cost proportional to the actual near-neighbor
//! density, which matters when the query repeats every simulation step.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use trellis_sweep::{Interval, intersecting_pairs, pairs_within_distance};
//!
//! // Intervals touching at an endpoint count as intersecting.
//! let pairs = intersecting_pairs(&[Interval::new(0.0, 2.0), Interval::new(2.0, 5.0)]);
//! assert_eq!(pairs, vec![(0, 1)]);
//!
//! let pts = [
//!     ("a", Point::new(0.0, 0.0)),
//!     ("b", Point::new(3.0, 4.0)),
//!     ("c", Point::new(40.0, 0.0)),
//! ];
//! let near = pairs_within_distance(&pts, 5.0);
//! assert_eq!(near.len(), 1);
//! assert_eq!((near[0].a, near[0].b), ("a", "b"));
//! assert_eq!(near[0].distance, 5.0);
//! ```
//!
//! ## Float semantics
//!
//! This crate assumes no NaN coordinates. Event ordering uses `f64::total_cmp`,
//! so NaNs will not panic, but results involving them are unspecified.

#![no_std]

extern crate alloc;

pub mod interval;
pub mod points;

pub use interval::{Interval, intersecting_pairs};
pub use points::{NearPair, pairs_within_distance};
