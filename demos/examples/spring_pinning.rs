// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinning during a live simulation.
//!
//! Simulates a user dragging one node of a ring: pin it, move it by hand for
//! a few iterations while the rest of the graph keeps settling, then release
//! it and let the spring pull it back.
//!
//! Run:
//! - `cargo run -p trellis_demos --example spring_pinning`

use kurbo::Point;
use trellis_spring::{AdjacencyList, LayoutState, SpringLayout, SpringLayoutParams};

fn main() {
    tracing_subscriber::fmt::init();

    let n = 6_u32;
    let mut graph = AdjacencyList::new();
    for i in 0..n {
        graph.add_edge(i, (i + 1) % n);
    }

    let mut engine = SpringLayout::with_seed(SpringLayoutParams::default(), 42);
    let mut state = LayoutState::new();

    // Let the ring settle first.
    for _ in 0..200 {
        engine.iterate(&graph, &mut state);
    }
    report("settled", &state, n);

    // Grab node 0 and drag it outward in steps. Pinned nodes accumulate no
    // velocity, so each set_position is final for that iteration.
    engine.params_mut().pin(0);
    for step in 1..=5 {
        let drag = Point::new(100.0 + 30.0 * step as f64, 0.0);
        state.set_position(0, drag);
        engine.iterate(&graph, &mut state);
    }
    report("dragged", &state, n);

    // Release and let the springs reclaim it.
    engine.params_mut().unpin(&0);
    for _ in 0..200 {
        engine.iterate(&graph, &mut state);
    }
    report("released", &state, n);
}

fn report(phase: &str, state: &LayoutState<u32>, n: u32) {
    let mut max_edge = 0.0_f64;
    for i in 0..n {
        if let (Some(a), Some(b)) = (state.position(i), state.position((i + 1) % n)) {
            max_edge = max_edge.max(a.distance(b));
        }
    }
    let p0 = state.position(0).unwrap_or(Point::ORIGIN);
    println!(
        "{phase:>9}: node 0 at ({:7.2}, {:7.2}), longest ring edge {max_edge:.2}",
        p0.x, p0.y
    );
}
