//! `salience rank` — per-node centrality deltas between two graphs.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use salience_core::{EntityId, RankMode, read_triples};
use salience_rank::rank_nodes;
use serde::Serialize;

use super::ConfigArgs;
use super::score::RankModeArg;
use crate::output::{OutputMode, Renderable, render_list};

/// Arguments for `salience rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Triple file of the observed graph.
    #[arg(long, value_name = "PATH")]
    pub observed: PathBuf,

    /// Triple file of the candidate graph.
    #[arg(long, value_name = "PATH")]
    pub candidate: PathBuf,

    /// How many nodes to show (default: all).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Which end of the ranking to show (default: the config's `rank_mode`).
    #[arg(long, value_enum)]
    pub rank_mode: Option<RankModeArg>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// One node of the delta ranking.
#[derive(Debug, Serialize)]
pub struct DeltaRow {
    pub node: EntityId,
    pub delta: f64,
}

impl Renderable for DeltaRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{:>10}  {:>+14.8}", self.node, self.delta)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}", self.node, self.delta)
    }

    fn table_headers() -> &'static [&'static str] {
        &["node", "delta"]
    }
}

/// Execute `salience rank`.
///
/// Rows keep the ascending order of the ranking, so in top mode the biggest
/// gainer is printed last.
pub fn run_rank(args: &RankArgs, output: OutputMode) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let observed = read_triples(&args.observed, &config.input)?;
    let candidate = read_triples(&args.candidate, &config.input)?;

    let ranking = rank_nodes(&observed, &candidate, &config)?;
    let n = args.limit.unwrap_or_else(|| ranking.len());
    let mode = args.rank_mode.map_or(config.rank_mode, RankMode::from);
    let rows: Vec<DeltaRow> = ranking
        .select(n, mode)
        .iter()
        .map(|d| DeltaRow {
            node: d.node,
            delta: d.delta,
        })
        .collect();

    render_list(&rows, output)?;
    Ok(())
}
