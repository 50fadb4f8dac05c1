//! Basic statistics for a triple graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: entities and triples.
//! - **density**: edges over the maximum simple-graph edge count,
//!   `m / (n(n-1))` directed or `2m / (n(n-1))` undirected. Parallel edges
//!   and self-loops can push this above 1.0. Zero for fewer than two nodes.
//! - **self_loop_count**: triples whose head equals their tail.
//! - **parallel_edge_count**: edges beyond the first between the same
//!   ordered pair (relation ids differ).
//! - **weakly_connected_component_count**: components when edge direction
//!   is ignored.
//! - **isolated_node_count**: nodes whose only edges are self-loops.
//! - **max_in_degree** / **max_out_degree**: counting edge multiplicity.

use std::collections::HashSet;

use petgraph::{Direction, algo::connected_components, visit::EdgeRef};
use serde::Serialize;

use crate::graph::build::TripleGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a [`TripleGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub density: f64,
    pub self_loop_count: usize,
    pub parallel_edge_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a [`TripleGraph`].
    #[must_use]
    pub fn from_graph(g: &TripleGraph) -> Self {
        let graph = &g.graph;
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let self_loop_count = graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        let distinct_pairs: HashSet<(usize, usize)> = graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();
        let parallel_edge_count = edge_count - distinct_pairs.len();

        let isolated_node_count = graph
            .node_indices()
            .filter(|&idx| {
                graph
                    .neighbors_undirected(idx)
                    .all(|other| other == idx)
            })
            .count();

        let max_in_degree = graph
            .node_indices()
            .map(|idx| graph.edges_directed(idx, Direction::Incoming).count())
            .max()
            .unwrap_or(0);

        let max_out_degree = graph
            .node_indices()
            .map(|idx| graph.edges_directed(idx, Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            directed: g.directed,
            density: compute_density(node_count, edge_count, g.directed),
            self_loop_count,
            parallel_edge_count,
            weakly_connected_component_count: connected_components(graph),
            isolated_node_count,
            max_in_degree,
            max_out_degree,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize, directed: bool) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    let edges = if directed {
        edge_count as f64
    } else {
        2.0 * edge_count as f64
    };
    edges / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
