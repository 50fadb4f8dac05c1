//! PageRank by power iteration.
//!
//! # Overview
//!
//! PageRank models a walker that follows a random fact out of the current
//! entity with probability `d` and jumps to a uniformly random entity
//! otherwise. Entities where the walk tends to settle score highly.
//!
//! # Algorithm
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) * w(u, v) / out_weight(u)   for each u → v
//!       + d * Σ PR(z) / N                                        for dangling z
//! ```
//!
//! `w(u, v)` counts the edges from `u` to `v`, so a pair linked by three
//! relations carries three times the rank of a pair linked by one. On an
//! undirected graph each edge can be walked both ways (a self-loop once).
//! Dangling nodes (no out-edges) spread their rank uniformly.
//!
//! Iteration stops once the L1 change is below `N * tolerance`. Scores sum
//! to 1.

use petgraph::visit::EdgeRef;
use salience_core::CentralityConfig;
use tracing::instrument;

use crate::graph::TripleGraph;
use crate::metrics::{IterativeResult, NodeScores, l1_change};

/// Compute PageRank for every node.
///
/// Uses `damping`, `max_iter` and `tolerance` from `config`.
#[must_use]
#[instrument(skip(g, config))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(g: &TripleGraph, config: &CentralityConfig) -> IterativeResult {
    let n = g.node_count();

    if n == 0 {
        return IterativeResult {
            scores: NodeScores::default(),
            iterations: 0,
            converged: true,
        };
    }

    let arcs = walkable_arcs(g);
    let mut out_weight = vec![0usize; n];
    for &(u, _) in &arcs {
        out_weight[u] += 1;
    }

    let n_f64 = n as f64;
    let d = config.damping;
    let threshold = n_f64 * config.tolerance;

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling: f64 = ranks
            .iter()
            .zip(&out_weight)
            .filter(|&(_, &w)| w == 0)
            .map(|(r, _)| r)
            .sum();
        let base = (1.0 - d) / n_f64 + d * dangling / n_f64;
        new_ranks.fill(base);

        for &(u, v) in &arcs {
            new_ranks[v] += d * ranks[u] / out_weight[u] as f64;
        }

        let change = l1_change(&ranks, &new_ranks);
        std::mem::swap(&mut ranks, &mut new_ranks);

        if change < threshold {
            converged = true;
            break;
        }
    }

    IterativeResult {
        scores: NodeScores::from_graph(g, ranks),
        iterations,
        converged,
    }
}

/// Every `(from, to)` step a walker can take, one per edge and direction.
fn walkable_arcs(g: &TripleGraph) -> Vec<(usize, usize)> {
    let mut arcs = Vec::with_capacity(g.edge_count() * if g.directed { 1 } else { 2 });
    for e in g.graph.edge_references() {
        let (s, t) = (e.source().index(), e.target().index());
        arcs.push((s, t));
        if !g.directed && s != t {
            arcs.push((t, s));
        }
    }
    arcs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
