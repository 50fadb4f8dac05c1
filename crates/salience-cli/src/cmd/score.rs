//! `salience score` — rank observed facts by the centrality their entities gain.
//!
//! Loads the observed and candidate triple files plus both label tables,
//! runs the full pipeline and prints the top-K triples. `--out` also writes
//! the keyed JSON result document to a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use salience_core::{Labels, PipelineConfig, RankMode, read_labels, read_triples};
use salience_rank::{Report, run};
use tracing::info;

use super::ConfigArgs;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// End of the delta ranking to draw gains from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankModeArg {
    /// Nodes that gained the most centrality.
    Top,
    /// Nodes that lost the most centrality.
    Bottom,
}

impl From<RankModeArg> for RankMode {
    fn from(arg: RankModeArg) -> Self {
        match arg {
            RankModeArg::Top => Self::Top,
            RankModeArg::Bottom => Self::Bottom,
        }
    }
}

/// Arguments for `salience score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Triple file of the observed graph.
    #[arg(long, value_name = "PATH")]
    pub observed: PathBuf,

    /// Triple file of the candidate graph (observed plus candidate facts).
    #[arg(long, value_name = "PATH")]
    pub candidate: PathBuf,

    /// Entity label file.
    #[arg(long, value_name = "PATH")]
    pub entities: PathBuf,

    /// Relation label file.
    #[arg(long, value_name = "PATH")]
    pub relations: PathBuf,

    /// How many triples to return.
    #[arg(short = 'k', long)]
    pub num_results: Option<usize>,

    /// Which end of the delta ranking feeds the triple scores.
    #[arg(long, value_enum)]
    pub rank_mode: Option<RankModeArg>,

    /// How many ranked nodes feed the triple scores (default: all).
    #[arg(long, value_name = "N")]
    pub gain_nodes: Option<usize>,

    /// Also write the result document as JSON to this file.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ScoreArgs {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = self.config.resolve()?;
        if let Some(k) = self.num_results {
            config.num_results = k;
        }
        if let Some(mode) = self.rank_mode {
            config.rank_mode = mode.into();
        }
        if self.gain_nodes.is_some() {
            config.gain_nodes = self.gain_nodes;
        }
        Ok(config)
    }
}

/// Execute `salience score`.
pub fn run_score(args: &ScoreArgs, output: OutputMode) -> anyhow::Result<()> {
    let config = args.pipeline_config()?;
    let layout = config.input;

    let observed = read_triples(&args.observed, &layout)?;
    let candidate = read_triples(&args.candidate, &layout)?;
    let labels = Labels::new(
        read_labels(&args.entities, &layout)?,
        read_labels(&args.relations, &layout)?,
    );
    info!(
        observed = observed.len(),
        candidate = candidate.len(),
        "loaded triple files"
    );

    let report = run(&observed, &candidate, &labels, &config)?;

    if let Some(path) = &args.out {
        write_records(path, &report)?;
        info!(path = %path.display(), records = report.records.len(), "wrote results");
    }

    render_mode(output, &report, render_text, render_pretty)
}

fn write_records(path: &Path, report: &Report) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report.records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn render_text(report: &Report, w: &mut dyn Write) -> std::io::Result<()> {
    if report.records.is_empty() {
        return Ok(());
    }
    writeln!(w, "triple_id\tscore\tlabel")?;
    for record in &report.records {
        writeln!(w, "{}\t{}\t{}", record.triple_id, record.score, record.label)?;
    }
    Ok(())
}

fn render_pretty(report: &Report, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Run")?;
    pretty_kv(w, "Measure", report.config.measure.name())?;
    pretty_kv(w, "Rank mode", report.config.rank_mode.to_string())?;
    pretty_kv(w, "Gain nodes", report.gain_nodes.to_string())?;
    pretty_kv(
        w,
        "Observed",
        format!(
            "{} nodes, {} edges",
            report.observed.stats.node_count, report.observed.stats.edge_count
        ),
    )?;
    pretty_kv(
        w,
        "Candidate",
        format!(
            "{} nodes, {} edges",
            report.candidate.stats.node_count, report.candidate.stats.edge_count
        ),
    )?;
    writeln!(w)?;

    pretty_section(w, &format!("Top {} triples", report.records.len()))?;
    if report.records.is_empty() {
        writeln!(w, "(none)")?;
    }
    for (rank, record) in report.records.iter().enumerate() {
        writeln!(
            w,
            "{:>4}. {:>12.6}  #{:<6} {}",
            rank + 1,
            record.score,
            record.triple_id,
            record.label
        )?;
    }
    pretty_rule(w)
}
