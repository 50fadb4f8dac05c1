#![forbid(unsafe_code)]
//! salience-core library.
//!
//! Data model and input plumbing shared by the ranking engine and the CLI:
//! integer-encoded [`Triple`]s, label tables, file loaders, the typed
//! [`Error`], and [`PipelineConfig`].
//!
//! # Conventions
//!
//! - **Errors**: Library functions return [`error::Result`]; the CLI wraps
//!   them in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod labels;
pub mod load;
pub mod model;

pub use config::{
    CentralityConfig, Delimiter, InputLayout, LookupOrder, Measure, PipelineConfig, RankMode,
    load_config,
};
pub use error::{CentralityFailure, Error, ErrorCode, Result};
pub use labels::{LabelKind, LabelTable, Labels};
pub use load::{parse_labels, parse_triples, read_labels, read_triples};
pub use model::{EntityId, RelationId, Triple, TripleSet};
