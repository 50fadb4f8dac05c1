//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness entities bridge otherwise
//! distant parts of the knowledge graph.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E). Parallel edges count once; self-loops never lie on
//! a shortest path. Unreachable pairs contribute nothing.
//!
//! # Scaling
//!
//! On an undirected graph every pair is seen from both ends, so raw sums are
//! halved. With `normalized` and `n > 2`, the unhalved sum is divided by
//! `(n-1)(n-2)`, which puts both orientations on a 0..=1 scale.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::TripleGraph;
use crate::metrics::NodeScores;

/// Compute betweenness centrality for all nodes in the graph.
///
/// Nodes with no shortest paths through them score 0.0.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(g: &TripleGraph, normalized: bool) -> NodeScores {
    let n = g.node_count();

    if n == 0 {
        return NodeScores::default();
    }

    let adj = g.adjacency();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // preds[w]: nodes immediately before w on shortest paths from s.
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (None = unvisited).
        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[s] = Some(0);

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for &w in &adj.successors[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    let scale = if normalized && n > 2 {
        Some(1.0 / ((n - 1) * (n - 2)) as f64)
    } else if g.directed {
        None
    } else {
        Some(0.5)
    };
    if let Some(scale) = scale {
        for x in &mut cb {
            *x *= scale;
        }
    }

    NodeScores::from_graph(g, cb)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
