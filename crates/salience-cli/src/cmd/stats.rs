//! `salience stats` — shape and fingerprint of a triple file's graph.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use salience_core::read_triples;
use salience_rank::{GraphSummary, TripleGraph};

use super::ConfigArgs;
use crate::output::{OutputMode, Renderable, pretty_kv, pretty_section, render_item};

/// Arguments for `salience stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Triple file to inspect.
    #[arg(long, value_name = "PATH")]
    pub triples: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Report payload for `salience stats`.
struct StatsView(GraphSummary);

impl Renderable for StatsView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let s = &self.0.stats;
        pretty_section(w, "Graph")?;
        pretty_kv(w, "Fingerprint", &self.0.fingerprint)?;
        pretty_kv(w, "Directed", s.directed.to_string())?;
        pretty_kv(w, "Nodes", s.node_count.to_string())?;
        pretty_kv(w, "Edges", s.edge_count.to_string())?;
        pretty_kv(w, "Density", format!("{:.6}", s.density))?;
        pretty_kv(w, "Self-loops", s.self_loop_count.to_string())?;
        pretty_kv(w, "Parallel edges", s.parallel_edge_count.to_string())?;
        pretty_kv(w, "Components", s.weakly_connected_component_count.to_string())?;
        pretty_kv(w, "Isolated nodes", s.isolated_node_count.to_string())?;
        pretty_kv(w, "Max in-degree", s.max_in_degree.to_string())?;
        pretty_kv(w, "Max out-degree", s.max_out_degree.to_string())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, &self.0).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let s = &self.0.stats;
        writeln!(w, "fingerprint\t{}", self.0.fingerprint)?;
        writeln!(w, "nodes\t{}", s.node_count)?;
        writeln!(w, "edges\t{}", s.edge_count)?;
        writeln!(w, "density\t{}", s.density)?;
        writeln!(w, "self_loops\t{}", s.self_loop_count)?;
        writeln!(w, "parallel_edges\t{}", s.parallel_edge_count)?;
        writeln!(w, "components\t{}", s.weakly_connected_component_count)?;
        writeln!(w, "isolated_nodes\t{}", s.isolated_node_count)
    }
}

/// Execute `salience stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let triples = read_triples(&args.triples, &config.input)?;
    let graph = TripleGraph::build(&triples, config.directed);
    render_item(&StatsView(GraphSummary::of(&graph)), output)?;
    Ok(())
}
