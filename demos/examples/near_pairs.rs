// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proximity queries over a point set.
//!
//! Scatter points deterministically, then find every pair closer than a
//! threshold with the two-axis sweep and print the closest few.
//!
//! Run:
//! - `cargo run -p trellis_demos --example near_pairs`

use kurbo::Point;
use trellis_sweep::pairs_within_distance;

fn main() {
    // A low-discrepancy scatter: additive recurrence keeps the points
    // spread out without pulling in a random number generator.
    let mut points = Vec::with_capacity(200);
    let (mut x, mut y) = (0.5_f64, 0.5_f64);
    for i in 0..200_usize {
        x = (x + 0.754_877_666) % 1.0;
        y = (y + 0.569_840_291) % 1.0;
        points.push((i, Point::new(x * 1000.0, y * 1000.0)));
    }

    let max_dist = 40.0;
    let mut pairs = pairs_within_distance(&points, max_dist);
    println!("{} pairs within {max_dist}", pairs.len());

    pairs.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    for pair in pairs.iter().take(10) {
        println!(
            "  #{:<3} ({:6.1}, {:6.1})  --  #{:<3} ({:6.1}, {:6.1})  d = {:5.2}",
            pair.a, pair.a_pos.x, pair.a_pos.y, pair.b, pair.b_pos.x, pair.b_pos.y, pair.distance
        );
    }
}
