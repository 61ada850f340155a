// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters implementing [`LayoutGraph`](crate::LayoutGraph) for external
//! graph types.
//!
//! - `petgraph` (feature `petgraph_adapter`): lay out a `petgraph::Graph`
//!   directly, keyed by node index.

#[cfg(feature = "petgraph_adapter")]
pub mod petgraph;
