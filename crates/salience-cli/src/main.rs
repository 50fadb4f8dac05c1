#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "salience: rank knowledge-graph facts by the centrality their entities gain",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Scoring",
        about = "Score observed triples by the centrality their entities gain",
        long_about = "Build the observed and candidate graphs, rank per-node centrality deltas, \
                      score every observed triple by the gains of its endpoints and print the top K.",
        after_help = "EXAMPLES:\n    # Top 10 observed facts by eigenvector gain\n    salience score --observed kb.txt --candidate kb+new.txt \\\n        --entities entities.txt --relations relations.txt -k 10\n\n    # Use the 50 biggest PageRank gainers and save the result\n    salience score --observed kb.txt --candidate kb+new.txt \\\n        --entities entities.txt --relations relations.txt \\\n        --measure pagerank --gain-nodes 50 --out top.json"
    )]
    Score(cmd::score::ScoreArgs),

    #[command(
        next_help_heading = "Scoring",
        about = "Show per-node centrality deltas",
        long_about = "Rank every observed node by how much its centrality changes in the candidate graph.",
        after_help = "EXAMPLES:\n    # The 20 nodes that gained the most\n    salience rank --observed kb.txt --candidate kb+new.txt -n 20\n\n    # The nodes that lost the most, as JSON\n    salience rank --observed kb.txt --candidate kb+new.txt --rank-mode bottom --format json"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        next_help_heading = "Inspection",
        about = "Score the nodes of one graph",
        long_about = "Compute a centrality measure on a single triple file and list nodes from highest to lowest score.",
        after_help = "EXAMPLES:\n    # Ten most central entities by betweenness\n    salience centrality --triples kb.txt --measure betweenness -n 10"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Inspection",
        about = "Show graph statistics",
        long_about = "Print size, density, components and the content fingerprint of a triple file's graph.",
        after_help = "EXAMPLES:\n    # Undirected statistics\n    salience stats --triples kb.txt\n\n    # Directed statistics as JSON\n    salience stats --triples kb.txt --directed --format json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SALIENCE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "salience=debug,info"
        } else {
            "salience=info,warn"
        })
    });

    let format = env::var("SALIENCE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let result = match &cli.command {
        Commands::Score(args) => cmd::score::run_score(args, output),
        Commands::Rank(args) => cmd::rank::run_rank(args, output),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("command failed: {err:#}");
            if let Err(render_err) = render_error(output, &CliError::from_anyhow(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
