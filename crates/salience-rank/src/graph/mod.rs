//! Triple graph module.
//!
//! # Overview
//!
//! This module turns a [`salience_core::TripleSet`] into a petgraph-based
//! multigraph that feeds every centrality metric. One graph is built per
//! triple set (observed and candidate) and never mutated afterwards.
//!
//! ## Pipeline
//!
//! ```text
//! TripleSet
//!        ↓  build::TripleGraph::build(triples, directed)
//! TripleGraph (DiGraph<EntityId, RelationId>, orientation flag)
//!        ├─ adjacency(): de-duplicated neighbour lists for the metrics
//!        └─ stats::GraphStats::from_graph(): density, components, loops, …
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use salience_rank::graph::{TripleGraph, GraphStats};
//!
//! let graph = TripleGraph::build(&triples, false);
//! let stats = GraphStats::from_graph(&graph);
//!
//! println!("nodes={} edges={} density={:.3} fingerprint={}",
//!     stats.node_count, stats.edge_count, stats.density, graph.content_hash);
//! ```

pub mod build;
pub mod stats;

pub use build::{Adjacency, TripleGraph};
pub use stats::GraphStats;
