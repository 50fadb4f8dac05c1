//! HITS (Hyperlink-Induced Topic Search) algorithm.
//!
//! # Overview
//!
//! HITS computes two scores for each node:
//!
//! - **Hub score**: how much a node points to good authorities. In a
//!   knowledge graph, a hub is an entity that is the subject of facts about
//!   important objects.
//! - **Authority score**: how much a node is pointed to by good hubs.
//!
//! # Algorithm
//!
//! Iterative power method (Kleinberg, 1999):
//!
//! 1. Initialize all hub and authority scores to `1/sqrt(n)`.
//! 2. Authority update: `auth(v) = sum of hub(u) for all u → v`.
//! 3. Hub update: `hub(v) = sum of auth(w) for all v → w`.
//! 4. Normalize both vectors to unit length (L2 norm).
//! 5. Stop once the combined L1 change is below `n * tolerance`.
//!
//! Parallel edges count once. On an undirected graph both updates read the
//! same neighbour lists, so hubs and authorities coincide.

use tracing::instrument;

use crate::graph::TripleGraph;
use crate::metrics::{NodeScores, l1_change, normalize_l2};

/// Result of the HITS algorithm.
#[derive(Debug, Clone)]
pub struct HitsResult {
    pub hubs: NodeScores,
    pub authorities: NodeScores,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute HITS hub and authority scores.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn hits(g: &TripleGraph, max_iter: usize, tolerance: f64) -> HitsResult {
    let n = g.node_count();

    if n == 0 {
        return HitsResult {
            hubs: NodeScores::default(),
            authorities: NodeScores::default(),
            iterations: 0,
            converged: true,
        };
    }

    let adj = g.adjacency();
    let threshold = n as f64 * tolerance;

    let init = 1.0 / (n as f64).sqrt();
    let mut hub: Vec<f64> = vec![init; n];
    let mut auth: Vec<f64> = vec![init; n];

    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..max_iter {
        iterations = iter + 1;

        let mut new_auth = vec![0.0; n];
        for (v, preds) in adj.predecessors.iter().enumerate() {
            new_auth[v] = preds.iter().map(|&u| hub[u]).sum();
        }

        let mut new_hub = vec![0.0; n];
        for (v, succs) in adj.successors.iter().enumerate() {
            new_hub[v] = succs.iter().map(|&w| new_auth[w]).sum();
        }

        normalize_l2(&mut new_auth);
        normalize_l2(&mut new_hub);

        let change = l1_change(&auth, &new_auth) + l1_change(&hub, &new_hub);

        auth = new_auth;
        hub = new_hub;

        if change < threshold {
            converged = true;
            break;
        }
    }

    HitsResult {
        hubs: NodeScores::from_graph(g, hub),
        authorities: NodeScores::from_graph(g, auth),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
