//! Degree centrality (total, in, out).
//!
//! Degree counts edges, not neighbours: parallel edges each count, and a
//! self-loop adds one to in-degree and one to out-degree (two to the total).
//! On an undirected graph in- and out-degree are not meaningful on their
//! own, so both report the total degree.
//!
//! When normalized, scores are divided by `n - 1`, the degree a node would
//! have if linked once to every other node. A graph of one node scores 1.0.

use petgraph::Direction;

use crate::graph::TripleGraph;
use crate::metrics::NodeScores;

/// Which edges a degree score counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeKind {
    Total,
    In,
    Out,
}

/// Compute degree centrality of the given kind for every node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &TripleGraph, kind: DegreeKind, normalized: bool) -> NodeScores {
    let n = g.node_count();
    let kind = if g.directed { kind } else { DegreeKind::Total };

    let raw: Vec<f64> = g
        .graph
        .node_indices()
        .map(|idx| {
            let in_d = g.graph.edges_directed(idx, Direction::Incoming).count();
            let out_d = g.graph.edges_directed(idx, Direction::Outgoing).count();
            let d = match kind {
                DegreeKind::Total => in_d + out_d,
                DegreeKind::In => in_d,
                DegreeKind::Out => out_d,
            };
            d as f64
        })
        .collect();

    let scores = if !normalized {
        raw
    } else if n <= 1 {
        vec![1.0; n]
    } else {
        let scale = 1.0 / (n - 1) as f64;
        raw.into_iter().map(|d| d * scale).collect()
    };

    NodeScores::from_graph(g, scores)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
