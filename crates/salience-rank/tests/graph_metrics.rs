//! Known-topology regression tests for centrality metrics.
//!
//! Each test uses a hand-crafted graph with known properties. Expected
//! values are computed analytically and hardcoded, so any algorithm change
//! that shifts values will be caught.

use salience_core::{CentralityConfig, EntityId, Measure, Triple, TripleSet};
use salience_rank::graph::GraphStats;
use salience_rank::metrics::hits::hits;
use salience_rank::metrics::pagerank::pagerank;
use salience_rank::{NodeScores, TripleGraph, centrality};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build(rows: &[(u64, u64, u64)], directed: bool) -> TripleGraph {
    let set: TripleSet = rows.iter().map(|&(h, t, r)| Triple::new(h, t, r)).collect();
    TripleGraph::build(&set, directed)
}

fn scores(g: &TripleGraph, measure: Measure) -> NodeScores {
    centrality(g, measure, &CentralityConfig::default())
        .unwrap_or_else(|e| panic!("{measure}: {e}"))
}

fn assert_close(s: &NodeScores, id: u64, expected: f64, eps: f64) {
    let actual = s.get(EntityId(id)).expect("node present");
    assert!(
        (actual - expected).abs() < eps,
        "node {id}: expected {expected}, got {actual}"
    );
}

/// Undirected star: 0 at the centre, leaves 1..=3.
fn star() -> TripleGraph {
    build(&[(0, 1, 0), (0, 2, 0), (0, 3, 0)], false)
}

// ---------------------------------------------------------------------------
// Star
// ---------------------------------------------------------------------------

#[test]
fn star_degree() {
    let s = scores(&star(), Measure::Degree);
    assert_close(&s, 0, 1.0, 1e-12);
    assert_close(&s, 1, 1.0 / 3.0, 1e-12);
}

#[test]
fn star_eigenvector() {
    // Dominant eigenvalue √3: centre = √3 · leaf, unit norm.
    let s = scores(&star(), Measure::Eigenvector);
    assert_close(&s, 0, 1.0 / 2.0_f64.sqrt(), 1e-5);
    for leaf in 1..=3 {
        assert_close(&s, leaf, 1.0 / 6.0_f64.sqrt(), 1e-5);
    }
}

#[test]
fn star_betweenness_and_closeness() {
    let g = star();
    let b = scores(&g, Measure::Betweenness);
    assert_close(&b, 0, 1.0, 1e-12);
    assert_close(&b, 2, 0.0, 1e-12);

    let c = scores(&g, Measure::Closeness);
    assert_close(&c, 0, 1.0, 1e-12);
    assert_close(&c, 3, 0.6, 1e-12);
}

#[test]
fn star_pagerank() {
    // c = 0.15/4 + 0.85·3l and l = 0.15/4 + 0.85·c/3 with c + 3l = 1.
    let s = scores(&star(), Measure::PageRank);
    assert_close(&s, 0, 0.8875 / 1.85, 1e-4);
    assert_close(&s, 1, (1.0 - 0.8875 / 1.85) / 3.0, 1e-4);
}

// ---------------------------------------------------------------------------
// Cycles and complete graphs
// ---------------------------------------------------------------------------

#[test]
fn complete_graph_is_uniform() {
    let g = build(
        &[(1, 2, 0), (1, 3, 0), (1, 4, 0), (2, 3, 0), (2, 4, 0), (3, 4, 0)],
        false,
    );
    let ev = scores(&g, Measure::Eigenvector);
    let bc = scores(&g, Measure::Betweenness);
    let deg = scores(&g, Measure::Degree);
    for id in 1..=4 {
        assert_close(&ev, id, 0.5, 1e-9);
        assert_close(&bc, id, 0.0, 1e-12);
        assert_close(&deg, id, 1.0, 1e-12);
    }
}

#[test]
fn directed_cycle_pagerank_and_hits() {
    let g = build(&[(1, 2, 0), (2, 3, 0), (3, 4, 0), (4, 1, 0)], true);
    let pr = pagerank(&g, &CentralityConfig::default());
    assert!(pr.converged);
    let h = hits(&g, 100, 1e-6);
    assert!(h.converged);
    for id in 1..=4 {
        assert_close(&pr.scores, id, 0.25, 1e-9);
        assert_close(&h.hubs, id, 0.5, 1e-9);
        assert_close(&h.authorities, id, 0.5, 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn path_of_five_betweenness() {
    // Unnormalized pair counts 3, 4, 3 over C(4, 2) = 6.
    let g = build(&[(1, 2, 0), (2, 3, 0), (3, 4, 0), (4, 5, 0)], false);
    let s = scores(&g, Measure::Betweenness);
    assert_close(&s, 1, 0.0, 1e-12);
    assert_close(&s, 2, 0.5, 1e-12);
    assert_close(&s, 3, 4.0 / 6.0, 1e-12);
    assert_close(&s, 4, 0.5, 1e-12);
}

#[test]
fn directed_path_in_and_out_degree() {
    let g = build(&[(1, 2, 0), (2, 3, 0)], true);
    let ins = scores(&g, Measure::InDegree);
    let outs = scores(&g, Measure::OutDegree);
    assert_close(&ins, 1, 0.0, 1e-12);
    assert_close(&ins, 3, 0.5, 1e-12);
    assert_close(&outs, 1, 0.5, 1e-12);
    assert_close(&outs, 3, 0.0, 1e-12);
}

// ---------------------------------------------------------------------------
// Multigraph details
// ---------------------------------------------------------------------------

#[test]
fn parallel_relations_change_degree_not_eigenvector() {
    let single = build(&[(1, 2, 0), (2, 3, 0), (3, 1, 0)], false);
    let multi = build(&[(1, 2, 0), (1, 2, 1), (2, 3, 0), (3, 1, 0)], false);

    let d_single = scores(&single, Measure::Degree);
    let d_multi = scores(&multi, Measure::Degree);
    assert_close(&d_single, 1, 1.0, 1e-12);
    assert_close(&d_multi, 1, 1.5, 1e-12);

    let e_single = scores(&single, Measure::Eigenvector);
    let e_multi = scores(&multi, Measure::Eigenvector);
    for id in 1..=3 {
        let expected = e_single.get(EntityId(id)).expect("node");
        assert_close(&e_multi, id, expected, 1e-12);
    }
}

#[test]
fn isolated_self_loop_node_is_scored() {
    let g = build(&[(1, 2, 0), (2, 3, 0), (3, 1, 0), (7, 7, 0)], false);
    for measure in Measure::ALL {
        let s = scores(&g, measure);
        assert!(s.contains(EntityId(7)), "{measure}");
    }
    let stats = GraphStats::from_graph(&g);
    assert_eq!(stats.isolated_node_count, 1);
    assert_eq!(stats.weakly_connected_component_count, 2);
}
