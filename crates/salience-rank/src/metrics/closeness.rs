//! Closeness centrality.
//!
//! # Definition
//!
//! Wasserman–Faust closeness, which stays meaningful on disconnected graphs
//! by only counting the nodes that can reach `v`:
//!
//! ```text
//! C(v) = (r - 1) / Σ d(u, v)  *  (r - 1) / (n - 1)
//! ```
//!
//! `r` is the number of nodes that reach `v` (including `v`). The second
//! factor shrinks scores of nodes in small components. On directed graphs
//! distances run *into* `v`; on undirected graphs direction is ignored.
//! A node nobody else reaches scores 0.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::TripleGraph;
use crate::metrics::NodeScores;

/// Compute closeness centrality for all nodes in the graph.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(g: &TripleGraph) -> NodeScores {
    let n = g.node_count();
    if n < 2 {
        return NodeScores::from_graph(g, vec![0.0; n]);
    }

    let adj = g.adjacency();
    let mut scores = Vec::with_capacity(n);

    for target in 0..n {
        let dist = bfs_distances(&adj.predecessors, target);
        let (reached, total) = dist
            .iter()
            .flatten()
            .filter(|&&d| d > 0)
            .fold((0usize, 0usize), |(r, t), &d| (r + 1, t + d));

        let score = if total == 0 {
            0.0
        } else {
            let r = reached as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        };
        scores.push(score);
    }

    NodeScores::from_graph(g, scores)
}

/// BFS hop counts from `source` along `neighbours`. `None` means unreachable.
fn bfs_distances(neighbours: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; neighbours.len()];
    dist[source] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let Some(dv) = dist[v] else { continue };
        for &w in &neighbours[v] {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
        }
    }

    dist
}
