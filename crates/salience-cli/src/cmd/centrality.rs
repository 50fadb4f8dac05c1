//! `salience centrality` — score every node of a single graph.

use std::cmp::Ordering;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use salience_core::{EntityId, read_triples};
use salience_rank::{TripleGraph, centrality};
use serde::Serialize;
use tracing::info;

use super::ConfigArgs;
use crate::output::{OutputMode, Renderable, render_list};

/// Arguments for `salience centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Triple file to score.
    #[arg(long, value_name = "PATH")]
    pub triples: PathBuf,

    /// Show only the N highest-scoring nodes.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// One node and its centrality score.
#[derive(Debug, Serialize)]
pub struct ScoreRow {
    pub node: EntityId,
    pub score: f64,
}

impl Renderable for ScoreRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{:>10}  {:>14.8}", self.node, self.score)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.node, self.score)
    }

    fn table_headers() -> &'static [&'static str] {
        &["node", "score"]
    }
}

/// Sort descending by score, ties in node order.
fn ranked_rows(scores: impl Iterator<Item = (EntityId, f64)>, limit: Option<usize>) -> Vec<ScoreRow> {
    let mut rows: Vec<ScoreRow> = scores.map(|(node, score)| ScoreRow { node, score }).collect();
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Execute `salience centrality`.
pub fn run_centrality(args: &CentralityArgs, output: OutputMode) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let triples = read_triples(&args.triples, &config.input)?;
    let graph = TripleGraph::build(&triples, config.directed);
    let scores = centrality(&graph, config.measure, &config.centrality)?;
    info!(measure = %config.measure, nodes = scores.len(), "scored graph");

    let rows = ranked_rows(scores.iter(), args.limit);
    render_list(&rows, output)?;
    Ok(())
}
