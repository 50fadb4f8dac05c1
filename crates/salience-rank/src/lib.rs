#![forbid(unsafe_code)]
//! salience-rank library.
//!
//! Turns two triple sets into a ranked list of observed facts whose
//! entities gain the most centrality in the candidate graph:
//! [`graph`] builds petgraph multigraphs, [`metrics`] scores nodes,
//! [`delta`] ranks per-node changes, [`score`] maps them back onto triples,
//! and [`pipeline`] runs the whole sequence.
//!
//! # Conventions
//!
//! - **Errors**: Return [`salience_core::Result`]; failures are typed
//!   [`salience_core::Error`] values, never panics.
//! - **Ordering**: Every sort is stable and every map iterates in graph node
//!   order, so equal inputs produce byte-identical output.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod delta;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod score;

pub use delta::{Gains, NodeDelta, Ranking, rank_changes};
pub use graph::{GraphStats, TripleGraph};
pub use metrics::{NodeScores, centrality};
pub use pipeline::{GraphSummary, Report, rank_nodes, run};
pub use score::{ResultRecord, TopTriples, score_triples, top_k};
