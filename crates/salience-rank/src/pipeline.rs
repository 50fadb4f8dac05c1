//! End-to-end scoring run.
//!
//! ```text
//! validate config
//!   → build observed + candidate graphs
//!   → centrality on each
//!   → rank deltas → select gains (gain_nodes, rank_mode)
//!   → score observed triples → top-K with labels
//! ```
//!
//! Every stage is a pure function of the previous stage's output. The first
//! error aborts the run; there are no partial results.

use salience_core::{Labels, PipelineConfig, Result, TripleSet};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::delta::{Ranking, rank_changes};
use crate::graph::{GraphStats, TripleGraph};
use crate::metrics::centrality;
use crate::score::{TopTriples, score_triples, top_k};

/// Fingerprint and shape of one input graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub fingerprint: String,
    pub stats: GraphStats,
}

impl GraphSummary {
    #[must_use]
    pub fn of(graph: &TripleGraph) -> Self {
        Self {
            fingerprint: graph.content_hash.clone(),
            stats: GraphStats::from_graph(graph),
        }
    }
}

/// Everything a scoring run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub config: PipelineConfig,
    pub observed: GraphSummary,
    pub candidate: GraphSummary,
    /// Number of nodes whose delta fed the triple scores.
    pub gain_nodes: usize,
    pub records: TopTriples,
}

/// Build both graphs and rank per-node centrality deltas.
///
/// # Errors
///
/// Returns [`salience_core::Error::Configuration`] for invalid settings and
/// [`salience_core::Error::Centrality`] if either graph's centrality fails.
pub fn rank_nodes(
    observed: &TripleSet,
    candidate: &TripleSet,
    config: &PipelineConfig,
) -> Result<Ranking> {
    config.validate()?;
    let observed_graph = TripleGraph::build(observed, config.directed);
    let candidate_graph = TripleGraph::build(candidate, config.directed);
    rank_graphs(&observed_graph, &candidate_graph, config)
}

fn rank_graphs(
    observed: &TripleGraph,
    candidate: &TripleGraph,
    config: &PipelineConfig,
) -> Result<Ranking> {
    let before = centrality(observed, config.measure, &config.centrality)?;
    let after = centrality(candidate, config.measure, &config.centrality)?;
    Ok(rank_changes(&before, &after))
}

/// Score the observed triples by how much their endpoints gained.
///
/// # Errors
///
/// Fails on invalid configuration, centrality failure on either graph, or a
/// kept triple with an unlabelled id.
#[instrument(
    skip_all,
    fields(measure = %config.measure, observed = observed.len(), candidate = candidate.len())
)]
pub fn run(
    observed: &TripleSet,
    candidate: &TripleSet,
    labels: &Labels,
    config: &PipelineConfig,
) -> Result<Report> {
    config.validate()?;

    let observed_graph = TripleGraph::build(observed, config.directed);
    let candidate_graph = TripleGraph::build(candidate, config.directed);
    debug!(
        observed_nodes = observed_graph.node_count(),
        candidate_nodes = candidate_graph.node_count(),
        "graphs built"
    );

    let ranking = rank_graphs(&observed_graph, &candidate_graph, config)?;
    let gains = ranking.gains(config.gain_nodes, config.rank_mode);
    debug!(ranked = ranking.len(), gain_nodes = gains.len(), "deltas ranked");

    let scores = score_triples(observed.as_slice(), &gains);
    let records = top_k(observed.as_slice(), &scores, config.num_results, labels)?;

    info!(records = records.len(), "scoring run complete");

    Ok(Report {
        config: config.clone(),
        observed: GraphSummary::of(&observed_graph),
        candidate: GraphSummary::of(&candidate_graph),
        gain_nodes: gains.len(),
        records,
    })
}
