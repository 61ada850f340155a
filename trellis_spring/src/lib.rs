// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Spring: a force-directed graph layout engine.
//!
//! ## Overview
//!
//! The engine positions graph nodes by iterating a physical simulation: each
//! node feels a Hooke spring force along every edge, a weak centering pull
//! toward the origin, and an inverse-square repulsion from nearby nodes.
//! Repulsion is bounded by a cutoff radius, and a uniform grid of
//! [`LayoutRegion`] buckets keeps the neighbor search local: only nodes in
//! the same or an adjacent grid cell are considered.
//!
//! The engine is generic over an opaque node key. It consumes any graph that
//! implements [`LayoutGraph`] ("all nodes" and "neighbors of node", nothing
//! more) and mutates positions held in a [`LayoutState`], which is the single
//! source of truth: no node owns its own position, so state can be swapped,
//! reset, or inspected externally between iterations.
//!
//! ## Driving the simulation
//!
//! [`SpringLayout::iterate`] performs exactly one step and returns a scalar
//! energy. There is no termination condition inside the engine; callers watch
//! the energy trend toward zero and stop when satisfied, or use the bundled
//! [`SpringLayout::run`] driver with a step budget and an energy threshold.
//!
//! ```rust
//! use trellis_spring::{AdjacencyList, LayoutState, SpringLayout, SpringLayoutParams};
//!
//! let mut graph = AdjacencyList::new();
//! graph.add_edge("a", "b");
//! graph.add_edge("b", "c");
//! graph.add_edge("c", "a");
//!
//! let mut engine = SpringLayout::with_seed(SpringLayoutParams::default(), 7);
//! let mut state = LayoutState::new();
//!
//! // Positions materialize lazily on the first step.
//! let mut energy = f64::INFINITY;
//! for _ in 0..100 {
//!     energy = engine.iterate(&graph, &mut state);
//! }
//! assert!(energy.is_finite());
//! assert!(state.position("a").is_some());
//! ```
//!
//! ## Pinning
//!
//! The parameter object carries a set of pinned keys, read fresh on every
//! call. Pinned nodes keep their position entry (other nodes still compute
//! forces against them) but receive no force, velocity, or position updates.
//! This is the mechanism behind "drag a node and let the rest of the layout
//! follow".
//!
//! ## Concurrency
//!
//! [`SpringLayout::iterate`] takes `&mut` receivers for both the engine and
//! the state, so two iterations can never interleave on the same state. All
//! force computation reads a consistent snapshot of pre-iteration positions;
//! no position moves until every force is accumulated.
//!
//! ## Failure semantics
//!
//! Nothing in this crate throws for degenerate numeric input. Coincident
//! nodes are split apart before forces are computed, any residual
//! zero-distance pair gets an explicit fallback force, and a non-finite
//! accumulated force is
//! logged at error level while the pass continues; the worst case is a
//! visually degenerate layout, never a crash.

pub mod engine;
pub mod graph;
pub mod params;
pub mod region;
pub mod state;

pub mod adapters;

pub use engine::{ConvergenceCriteria, SolveReport, SpringLayout};
pub use graph::{AdjacencyList, LayoutGraph};
pub use params::SpringLayoutParams;
pub use region::LayoutRegion;
pub use state::LayoutState;
