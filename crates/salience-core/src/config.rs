//! Run configuration.
//!
//! Every field has a default, so an empty TOML file (or none at all) yields
//! the reference setup: eigenvector centrality on undirected graphs, the
//! top 100 triples, gains taken from every observed node.
//!
//! ```toml
//! measure = "eigenvector"
//! num_results = 100
//! directed = false
//! rank_mode = "top"
//! # gain_nodes = 500
//!
//! [centrality]
//! max_iter = 100
//! tolerance = 1e-6
//! damping = 0.85
//! normalized = true
//!
//! [input]
//! delimiter = "whitespace"
//! lookup_order = "text_id"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Centrality measure computed on both graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Degree,
    InDegree,
    OutDegree,
    #[default]
    Eigenvector,
    #[serde(rename = "pagerank", alias = "page_rank")]
    PageRank,
    Betweenness,
    Closeness,
    Hub,
    Authority,
}

impl Measure {
    pub const ALL: [Self; 9] = [
        Self::Degree,
        Self::InDegree,
        Self::OutDegree,
        Self::Eigenvector,
        Self::PageRank,
        Self::Betweenness,
        Self::Closeness,
        Self::Hub,
        Self::Authority,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::InDegree => "in_degree",
            Self::OutDegree => "out_degree",
            Self::Eigenvector => "eigenvector",
            Self::PageRank => "pagerank",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Hub => "hub",
            Self::Authority => "authority",
        }
    }

    /// Whether the measure is computed by power iteration and so depends on
    /// `max_iter` and `tolerance`.
    #[must_use]
    pub const fn is_iterative(self) -> bool {
        matches!(
            self,
            Self::Eigenvector | Self::PageRank | Self::Hub | Self::Authority
        )
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "page_rank" {
            return Ok(Self::PageRank);
        }
        Self::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|m| m.name()).collect();
                Error::Configuration(format!(
                    "unknown measure '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Which end of the ascending delta ranking a selection takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// The largest deltas (the tail of the ascending ranking).
    #[default]
    Top,
    /// The smallest, most negative deltas (the head of the ranking).
    Bottom,
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

impl FromStr for RankMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(Error::Configuration(format!(
                "invalid rank mode '{s}' (expected 'top' or 'bottom')"
            ))),
        }
    }
}

/// Parameters shared by the centrality routines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Iteration cap for power-iteration measures.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Convergence threshold. Iteration stops once the L1 change of the score
    /// vector is below `node_count * tolerance`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// PageRank damping factor.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Normalize degree, betweenness and closeness by their maximum possible value.
    #[serde(default = "default_true")]
    pub normalized: bool,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            damping: default_damping(),
            normalized: default_true(),
        }
    }
}

/// Column separator for triple and label files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Any run of spaces or tabs.
    #[default]
    Whitespace,
    /// A single tab.
    Tab,
}

/// Column order of label files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOrder {
    /// `text<delim>id`
    #[default]
    TextId,
    /// `id<delim>text`
    IdText,
}

/// File conventions for the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputLayout {
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default)]
    pub lookup_order: LookupOrder,
}

/// Everything a scoring run needs besides its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub measure: Measure,
    /// K: how many triples to return.
    #[serde(default = "default_num_results")]
    pub num_results: usize,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub rank_mode: RankMode,
    /// How many ranked nodes feed the triple scores. `None` keeps all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_nodes: Option<usize>,
    #[serde(default)]
    pub centrality: CentralityConfig,
    #[serde(default)]
    pub input: InputLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            measure: Measure::default(),
            num_results: default_num_results(),
            directed: false,
            rank_mode: RankMode::default(),
            gain_nodes: None,
            centrality: CentralityConfig::default(),
            input: InputLayout::default(),
        }
    }
}

impl PipelineConfig {
    /// Reject out-of-range parameters before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        let c = &self.centrality;
        if c.max_iter == 0 {
            return Err(Error::Configuration(
                "centrality.max_iter must be at least 1".to_string(),
            ));
        }
        if !c.tolerance.is_finite() || c.tolerance <= 0.0 {
            return Err(Error::Configuration(format!(
                "centrality.tolerance must be a positive finite number, got {}",
                c.tolerance
            )));
        }
        if !(c.damping > 0.0 && c.damping < 1.0) {
            return Err(Error::Configuration(format!(
                "centrality.damping must lie strictly between 0 and 1, got {}",
                c.damping
            )));
        }
        Ok(())
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] (attributed to `origin`) on invalid TOML
    /// or unknown enum values.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| Error::ConfigParse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Load a [`PipelineConfig`] from a TOML file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::ConfigParse`] if it is not a valid config.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PipelineConfig::from_toml_str(&content, path)
}

const fn default_true() -> bool {
    true
}

const fn default_num_results() -> usize {
    100
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_damping() -> f64 {
    0.85
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_run() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.measure, Measure::Eigenvector);
        assert_eq!(cfg.num_results, 100);
        assert!(!cfg.directed);
        assert_eq!(cfg.rank_mode, RankMode::Top);
        assert_eq!(cfg.gain_nodes, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn power_iteration_measures_are_iterative() {
        for m in [Measure::Eigenvector, Measure::PageRank, Measure::Hub, Measure::Authority] {
            assert!(m.is_iterative(), "{m}");
        }
        for m in [Measure::Degree, Measure::Betweenness, Measure::Closeness] {
            assert!(!m.is_iterative(), "{m}");
        }
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = PipelineConfig::from_toml_str("", Path::new("inline")).expect("parse");
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let cfg = PipelineConfig::from_toml_str(
            r#"
measure = "pagerank"
num_results = 5
directed = true
rank_mode = "bottom"
gain_nodes = 12

[centrality]
damping = 0.9

[input]
delimiter = "tab"
lookup_order = "id_text"
"#,
            Path::new("inline"),
        )
        .expect("parse");

        assert_eq!(cfg.measure, Measure::PageRank);
        assert_eq!(cfg.num_results, 5);
        assert!(cfg.directed);
        assert_eq!(cfg.rank_mode, RankMode::Bottom);
        assert_eq!(cfg.gain_nodes, Some(12));
        assert!((cfg.centrality.damping - 0.9).abs() < f64::EPSILON);
        assert_eq!(cfg.centrality.max_iter, 100);
        assert_eq!(cfg.input.delimiter, Delimiter::Tab);
        assert_eq!(cfg.input.lookup_order, LookupOrder::IdText);
    }

    #[test]
    fn unknown_measure_in_toml_is_parse_error() {
        let err = PipelineConfig::from_toml_str("measure = \"katz\"", Path::new("inline"))
            .expect_err("katz is unsupported");
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn measure_from_str_is_lenient_about_case_and_dashes() {
        assert_eq!("Eigenvector".parse::<Measure>().ok(), Some(Measure::Eigenvector));
        assert_eq!("in-degree".parse::<Measure>().ok(), Some(Measure::InDegree));
        assert_eq!("page_rank".parse::<Measure>().ok(), Some(Measure::PageRank));
        for m in Measure::ALL {
            assert_eq!(m.name().parse::<Measure>().ok(), Some(m));
        }
    }

    #[test]
    fn unknown_measure_is_configuration_error() {
        let err = "katz".parse::<Measure>().expect_err("unsupported");
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("katz")));
    }

    #[test]
    fn invalid_rank_mode_is_configuration_error() {
        assert_eq!("TOP".parse::<RankMode>().ok(), Some(RankMode::Top));
        assert!(matches!(
            "middle".parse::<RankMode>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn zero_results_is_valid() {
        let cfg = PipelineConfig {
            num_results: 0,
            gain_nodes: Some(0),
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_centrality_settings() {
        let mut cfg = PipelineConfig::default();
        cfg.centrality.tolerance = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.centrality.damping = 1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.centrality.max_iter = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "num_results = 3").expect("write");
        let cfg = load_config(file.path()).expect("load");
        assert_eq!(cfg.num_results, 3);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, Error::Io { .. }));
    }
}
