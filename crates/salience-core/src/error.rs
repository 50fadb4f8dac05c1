use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::config::Measure;
use crate::labels::LabelKind;
use crate::model::EntityId;

/// Machine-readable error codes for scripts and agents driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfiguration,
    InputUnreadable,
    MalformedInput,
    LabelMissing,
    CentralityNotConverged,
    CentralityNonFinite,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidConfiguration => "E1002",
            Self::InputUnreadable => "E2001",
            Self::MalformedInput => "E2002",
            Self::LabelMissing => "E3001",
            Self::CentralityNotConverged => "E4001",
            Self::CentralityNonFinite => "E4002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::InputUnreadable => "Input file unreadable",
            Self::MalformedInput => "Malformed input row",
            Self::LabelMissing => "Id missing from label table",
            Self::CentralityNotConverged => "Centrality iteration did not converge",
            Self::CentralityNonFinite => "Centrality produced a non-finite score",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix the TOML syntax in the config file and retry."),
            Self::InvalidConfiguration => {
                Some("Check measure, num_results, rank_mode and the centrality settings.")
            }
            Self::InputUnreadable => Some("Check the path and read permissions."),
            Self::MalformedInput => {
                Some("Triple rows are `head tail relation`; label rows follow the configured lookup order.")
            }
            Self::LabelMissing => {
                Some("The label tables do not match the id space of the triple file.")
            }
            Self::CentralityNotConverged => {
                Some("Raise centrality.max_iter or loosen centrality.tolerance, or pick another measure.")
            }
            Self::CentralityNonFinite => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why a centrality computation was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CentralityFailure {
    #[error("power iteration did not converge within {max_iter} iterations")]
    NotConverged { max_iter: usize },

    #[error("non-finite score {value} for node {node}")]
    NonFinite { node: EntityId, value: f64 },
}

/// Every way a scoring run can fail.
///
/// All stages fail fast: the first error aborts the run and nothing partial
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A triple or label row is malformed.
    #[error("{source_name}:{line}: {reason}")]
    InputFormat {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// A triple references an id absent from a label table.
    #[error("no {table} label for id {id} (triple #{triple_index})")]
    Lookup {
        table: LabelKind,
        id: u64,
        triple_index: usize,
    },

    /// The chosen measure's preconditions do not hold on this graph.
    #[error("{measure} centrality failed: {reason}")]
    Centrality {
        measure: Measure,
        reason: CentralityFailure,
    },

    /// A config file exists but is not valid TOML for [`crate::config::PipelineConfig`].
    #[error("failed to parse {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// A parameter is out of range or names something unknown.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn input_format(
        source_name: &str,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InputFormat {
            source_name: source_name.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputUnreadable,
            Self::InputFormat { .. } => ErrorCode::MalformedInput,
            Self::Lookup { .. } => ErrorCode::LabelMissing,
            Self::Centrality {
                reason: CentralityFailure::NotConverged { .. },
                ..
            } => ErrorCode::CentralityNotConverged,
            Self::Centrality {
                reason: CentralityFailure::NonFinite { .. },
                ..
            } => ErrorCode::CentralityNonFinite,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::Configuration(_) => ErrorCode::InvalidConfiguration,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
