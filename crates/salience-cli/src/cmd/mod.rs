//! Subcommand handlers and the settings they share.
//!
//! Every command starts from [`ConfigArgs::resolve`]: the TOML config file (or
//! the built-in defaults) with command-line overrides applied on top, then
//! validated.

pub mod centrality;
pub mod rank;
pub mod score;
pub mod stats;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use salience_core::{Delimiter, LookupOrder, Measure, PipelineConfig, load_config};
use tracing::debug;

/// Column separator accepted by `--delimiter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DelimiterArg {
    /// Any run of spaces or tabs.
    Whitespace,
    /// A single tab.
    Tab,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Whitespace => Self::Whitespace,
            DelimiterArg::Tab => Self::Tab,
        }
    }
}

/// Label file column order accepted by `--lookup-order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupOrderArg {
    /// `text<delim>id`
    TextId,
    /// `id<delim>text`
    IdText,
}

impl From<LookupOrderArg> for LookupOrder {
    fn from(arg: LookupOrderArg) -> Self {
        match arg {
            LookupOrderArg::TextId => Self::TextId,
            LookupOrderArg::IdText => Self::IdText,
        }
    }
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// TOML config file; flags below override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Centrality measure (degree, in_degree, out_degree, eigenvector,
    /// pagerank, betweenness, closeness, hub, authority).
    #[arg(long, short = 'm')]
    pub measure: Option<String>,

    /// Treat each triple as a directed head → tail edge.
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Treat each triple as an undirected edge, overriding the config file.
    #[arg(long)]
    pub undirected: bool,

    /// Iteration cap for power-iteration measures.
    #[arg(long, value_name = "N")]
    pub max_iter: Option<usize>,

    /// Convergence threshold for power-iteration measures.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Column separator of the input files.
    #[arg(long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Column order of the label files.
    #[arg(long, value_enum)]
    pub lookup_order: Option<LookupOrderArg>,
}

impl ConfigArgs {
    /// Load the config file (if any), apply overrides and validate.
    pub fn resolve(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                load_config(path)?
            }
            None => PipelineConfig::default(),
        };

        if let Some(measure) = &self.measure {
            config.measure = measure.parse::<Measure>()?;
        }
        if self.directed {
            config.directed = true;
        } else if self.undirected {
            config.directed = false;
        }
        if let Some(max_iter) = self.max_iter {
            config.centrality.max_iter = max_iter;
        }
        if let Some(tolerance) = self.tolerance {
            config.centrality.tolerance = tolerance;
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter.into();
        }
        if let Some(order) = self.lookup_order {
            config.input.lookup_order = order.into();
        }

        config.validate()?;
        if config.measure.is_iterative() {
            debug!(
                measure = %config.measure,
                max_iter = config.centrality.max_iter,
                tolerance = config.centrality.tolerance,
                "power-iteration settings"
            );
        } else {
            debug!(measure = %config.measure, directed = config.directed, "resolved config");
        }
        Ok(config)
    }
}
