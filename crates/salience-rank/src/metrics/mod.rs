//! Centrality metrics for triple graphs.
//!
//! # Overview
//!
//! Every metric takes a [`TripleGraph`] and returns [`NodeScores`]: one
//! score per node, stored in node-index (first-seen) order. Each metric
//! answers a different question about entity importance:
//!
//! - **Degree** (`degree`): how many facts mention the entity?
//! - **Eigenvector** (`eigenvector`): is the entity linked to other
//!   important entities? This is the default measure.
//! - **PageRank** (`pagerank`): where does a random walk over facts settle?
//! - **Betweenness** (`betweenness`): which entities bridge parts of the graph?
//! - **Closeness** (`closeness`): which entities are few hops from the rest?
//! - **HITS** (`hits`): hubs point at good authorities, authorities are
//!   pointed at by good hubs.
//!
//! # Usage
//!
//! [`centrality`] dispatches on [`Measure`] and turns non-convergence or
//! non-finite output into [`Error::Centrality`]. The per-metric functions
//! are public for callers that want iteration counts.
//!
//! ```rust,ignore
//! use salience_core::{CentralityConfig, Measure};
//! use salience_rank::metrics::centrality;
//!
//! let scores = centrality(&graph, Measure::Eigenvector, &CentralityConfig::default())?;
//! for (entity, score) in scores.iter() {
//!     println!("{entity}\t{score:.6}");
//! }
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod hits;
pub mod pagerank;

use std::collections::HashMap;

use salience_core::{CentralityConfig, CentralityFailure, EntityId, Error, Measure, Result};
use tracing::{debug, instrument};

use crate::graph::TripleGraph;

use self::degree::DegreeKind;

// ---------------------------------------------------------------------------
// NodeScores
// ---------------------------------------------------------------------------

/// A score per node, in graph node order.
///
/// Lookups by entity go through a hash index; iteration follows the order
/// the scores were produced in, which for graph metrics is node-index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeScores {
    nodes: Vec<EntityId>,
    scores: Vec<f64>,
    index: HashMap<EntityId, usize>,
}

impl NodeScores {
    /// Pair a node-indexed score vector with the graph's entities.
    ///
    /// `scores[i]` belongs to the node at index `i`.
    #[must_use]
    pub fn from_graph(g: &TripleGraph, scores: Vec<f64>) -> Self {
        debug_assert_eq!(g.node_count(), scores.len());
        let nodes: Vec<EntityId> = g.entities().collect();
        let index = nodes.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        Self {
            nodes,
            scores,
            index,
        }
    }

    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<f64> {
        self.index.get(&entity).map(|&i| self.scores[i])
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.index.contains_key(&entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(entity, score)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, f64)> + '_ {
        self.nodes.iter().copied().zip(self.scores.iter().copied())
    }

    /// The raw score vector, aligned with [`NodeScores::iter`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.scores
    }

    /// First node whose score is NaN or infinite.
    fn first_non_finite(&self) -> Option<(EntityId, f64)> {
        self.iter().find(|(_, s)| !s.is_finite())
    }
}

/// Later pairs for an entity already present overwrite its score but keep
/// its original position.
impl FromIterator<(EntityId, f64)> for NodeScores {
    fn from_iter<I: IntoIterator<Item = (EntityId, f64)>>(iter: I) -> Self {
        let mut out = Self::default();
        for (entity, score) in iter {
            if let Some(&i) = out.index.get(&entity) {
                out.scores[i] = score;
            } else {
                out.index.insert(entity, out.nodes.len());
                out.nodes.push(entity);
                out.scores.push(score);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Iterative results
// ---------------------------------------------------------------------------

/// Outcome of a power-iteration metric.
#[derive(Debug, Clone)]
pub struct IterativeResult {
    pub scores: NodeScores,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the change fell below tolerance within `max_iter`.
    pub converged: bool,
}

impl IterativeResult {
    fn into_scores(self, measure: Measure, max_iter: usize) -> Result<NodeScores> {
        if self.converged {
            debug!(%measure, iterations = self.iterations, "converged");
            Ok(self.scores)
        } else {
            Err(Error::Centrality {
                measure,
                reason: CentralityFailure::NotConverged { max_iter },
            })
        }
    }
}

/// Sum of absolute differences, compared against `n * tolerance` by the
/// iterative metrics.
pub(crate) fn l1_change(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new).map(|(a, b)| (a - b).abs()).sum()
}

/// Scale to unit L2 norm. A zero vector is left unchanged.
pub(crate) fn normalize_l2(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compute `measure` for every node of `graph`.
///
/// # Errors
///
/// Returns [`Error::Centrality`] when an iterative measure does not converge
/// within `config.max_iter`, or when any score is NaN or infinite.
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), directed = graph.directed))]
pub fn centrality(
    graph: &TripleGraph,
    measure: Measure,
    config: &CentralityConfig,
) -> Result<NodeScores> {
    let scores = match measure {
        Measure::Degree => degree::degree_centrality(graph, DegreeKind::Total, config.normalized),
        Measure::InDegree => degree::degree_centrality(graph, DegreeKind::In, config.normalized),
        Measure::OutDegree => degree::degree_centrality(graph, DegreeKind::Out, config.normalized),
        Measure::Eigenvector => {
            eigenvector::eigenvector_centrality(graph, config.max_iter, config.tolerance)
                .into_scores(measure, config.max_iter)?
        }
        Measure::PageRank => pagerank::pagerank(graph, config).into_scores(measure, config.max_iter)?,
        Measure::Betweenness => betweenness::betweenness_centrality(graph, config.normalized),
        Measure::Closeness => closeness::closeness_centrality(graph),
        Measure::Hub | Measure::Authority => {
            let result = hits::hits(graph, config.max_iter, config.tolerance);
            if !result.converged {
                return Err(Error::Centrality {
                    measure,
                    reason: CentralityFailure::NotConverged {
                        max_iter: config.max_iter,
                    },
                });
            }
            debug!(%measure, iterations = result.iterations, "converged");
            if measure == Measure::Hub {
                result.hubs
            } else {
                result.authorities
            }
        }
    };

    if let Some((node, value)) = scores.first_non_finite() {
        return Err(Error::Centrality {
            measure,
            reason: CentralityFailure::NonFinite { node, value },
        });
    }
    Ok(scores)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
