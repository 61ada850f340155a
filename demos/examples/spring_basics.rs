// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spring layout basics.
//!
//! Build a small graph, run the engine to convergence, and print the
//! resulting positions.
//!
//! Run:
//! - `cargo run -p trellis_demos --example spring_basics`

use trellis_spring::{
    AdjacencyList, ConvergenceCriteria, LayoutState, SpringLayout, SpringLayoutParams,
};

fn main() {
    tracing_subscriber::fmt::init();

    // A hub with four spokes, plus a chain hanging off one spoke.
    let mut graph = AdjacencyList::new();
    for (a, b) in [
        ("hub", "n1"),
        ("hub", "n2"),
        ("hub", "n3"),
        ("hub", "n4"),
        ("n4", "tail1"),
        ("tail1", "tail2"),
    ] {
        graph.add_edge(a, b);
    }

    let mut engine = SpringLayout::with_seed(SpringLayoutParams::default(), 42);
    let mut state = LayoutState::new();

    // No positions assigned up front: every node materializes near its
    // already-placed neighbors on the first iteration.
    let report = engine.run(
        &graph,
        &mut state,
        &ConvergenceCriteria {
            max_steps: 1000,
            energy_threshold: 1e-3,
        },
    );

    println!(
        "{} after {} steps (energy {:.3e})",
        if report.converged {
            "converged"
        } else {
            "step budget exhausted"
        },
        report.steps,
        report.energy,
    );
    let mut placed: Vec<_> = state.positions().collect();
    placed.sort_by_key(|(name, _)| *name);
    for (name, pos) in placed {
        println!("{name:>6}: ({:8.2}, {:8.2})", pos.x, pos.y);
    }
}
