//! End-to-end scoring runs on small hand-built knowledge graphs.
//!
//! The main scenario: a 3-cycle is observed, and the candidate graph adds a
//! fourth entity hanging off node 1. Node 1 must gain the most centrality,
//! and facts touching node 1 must outrank facts that do not.

use salience_core::{
    EntityId, Error, LabelKind, LabelTable, Labels, Measure, PipelineConfig, RankMode, Triple,
    TripleSet,
};
use salience_rank::{rank_changes, rank_nodes, run};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn set(rows: &[(u64, u64, u64)]) -> TripleSet {
    rows.iter().map(|&(h, t, r)| Triple::new(h, t, r)).collect()
}

fn cycle() -> TripleSet {
    set(&[(1, 2, 0), (2, 3, 0), (3, 1, 0)])
}

fn cycle_with_pendant() -> TripleSet {
    set(&[(1, 2, 0), (2, 3, 0), (3, 1, 0), (1, 4, 0)])
}

fn labels() -> Labels {
    Labels::new(
        [(1, "Ada"), (2, "Babbage"), (3, "Menabrea"), (4, "Somerville")]
            .into_iter()
            .collect::<LabelTable>(),
        [(0, "corresponded_with")].into_iter().collect::<LabelTable>(),
    )
}

fn delta(ranking: &salience_rank::Ranking, id: u64) -> f64 {
    ranking.delta(EntityId(id)).expect("observed node")
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn pendant_anchor_gains_most() {
    let ranking = rank_nodes(&cycle(), &cycle_with_pendant(), &PipelineConfig::default())
        .expect("eigenvector converges on both graphs");

    assert_eq!(ranking.len(), 3, "candidate-only node 4 is not ranked");
    assert!(delta(&ranking, 1) > delta(&ranking, 2));
    assert!(delta(&ranking, 1) > delta(&ranking, 3));
    assert_eq!(ranking.entries().last().map(|d| d.node), Some(EntityId(1)));
}

#[test]
fn facts_touching_the_anchor_rank_first() {
    let report = run(
        &cycle(),
        &cycle_with_pendant(),
        &labels(),
        &PipelineConfig::default(),
    )
    .expect("run");

    let score_of = |triple_id: usize| report.records.get(triple_id).expect("kept").score;
    assert!(score_of(0) >= score_of(1), "(1,2,0) vs (2,3,0)");
    assert!(score_of(2) >= score_of(1), "(3,1,0) vs (2,3,0)");

    let first = &report.records.records()[0];
    assert_eq!(first.triple_id, 0, "tie between (1,2,0) and (3,1,0) keeps file order");
    assert_eq!(first.label, "Ada corresponded_with Babbage");
    assert_eq!(first.endpoints, Triple::new(1, 2, 0));
}

#[test]
fn observed_cycle_scores_are_uniform() {
    let ranking = rank_nodes(&cycle(), &cycle(), &PipelineConfig::default()).expect("rank");
    for entry in ranking.entries() {
        assert!(entry.delta.abs() < 1e-9, "{entry:?}");
    }
}

#[test]
fn json_output_is_keyed_by_triple_index() {
    let report = run(&cycle(), &cycle_with_pendant(), &labels(), &PipelineConfig::default())
        .expect("run");
    let json = serde_json::to_value(&report.records).expect("serialize");
    let object = json.as_object().expect("object");
    assert_eq!(object.len(), 3);
    assert_eq!(json["1"]["label"], "Babbage corresponded_with Menabrea");
    assert_eq!(json["1"]["endpoints"], serde_json::json!([2, 3, 0]));
    assert!(json["1"]["score"].is_f64());
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn zero_results_is_empty() {
    let config = PipelineConfig {
        num_results: 0,
        ..PipelineConfig::default()
    };
    let report = run(&cycle(), &cycle_with_pendant(), &labels(), &config).expect("run");
    assert!(report.records.is_empty());
}

#[test]
fn oversized_k_returns_every_triple_once() {
    let config = PipelineConfig {
        num_results: 50,
        ..PipelineConfig::default()
    };
    let report = run(&cycle(), &cycle_with_pendant(), &labels(), &config).expect("run");
    let mut ids: Vec<usize> = report.records.iter().map(|r| r.triple_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn restricted_gains_zero_out_other_nodes() {
    let config = PipelineConfig {
        gain_nodes: Some(1),
        ..PipelineConfig::default()
    };
    let report = run(&cycle(), &cycle_with_pendant(), &labels(), &config).expect("run");
    assert_eq!(report.gain_nodes, 1);
    // Only node 1 carries a gain, so (2,3,0) scores exactly zero.
    let middle = report.records.get(1).expect("kept");
    assert!(middle.score.abs() < f64::EPSILON);
    assert!(report.records.get(0).expect("kept").score > 0.0);
}

#[test]
fn bottom_mode_selects_the_losers() {
    let config = PipelineConfig {
        gain_nodes: Some(2),
        rank_mode: RankMode::Bottom,
        ..PipelineConfig::default()
    };
    let report = run(&cycle(), &cycle_with_pendant(), &labels(), &config).expect("run");
    // Nodes 2 and 3 lost centrality; (2,3,0) sums both losses and sinks last.
    let last = report.records.records().last().expect("records");
    assert_eq!(last.triple_id, 1);
    assert!(last.score < 0.0);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unlabelled_entity_is_lookup_error() {
    let observed = set(&[(1, 2, 0), (2, 9, 0), (9, 1, 0)]);
    let err = run(&observed, &observed, &labels(), &PipelineConfig::default())
        .expect_err("entity 9 has no label");
    match err {
        Error::Lookup { table, id, .. } => {
            assert_eq!(table, LabelKind::Entity);
            assert_eq!(id, 9);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unlabelled_relation_is_lookup_error() {
    let observed = set(&[(1, 2, 7)]);
    let config = PipelineConfig {
        measure: Measure::Degree,
        ..PipelineConfig::default()
    };
    let err = run(&observed, &observed, &labels(), &config).expect_err("relation 7");
    assert!(matches!(
        err,
        Error::Lookup {
            table: LabelKind::Relation,
            id: 7,
            triple_index: 0
        }
    ));
}

#[test]
fn non_convergence_aborts_the_run() {
    let mut config = PipelineConfig {
        directed: true,
        ..PipelineConfig::default()
    };
    config.centrality.max_iter = 3;
    let chain = set(&[(1, 2, 0), (2, 3, 0), (3, 4, 0)]);
    let err = run(&chain, &chain, &labels(), &config).expect_err("chain never settles");
    assert!(matches!(err, Error::Centrality { .. }));
}

#[test]
fn every_measure_runs_on_the_scenario() {
    for measure in Measure::ALL {
        let config = PipelineConfig {
            measure,
            ..PipelineConfig::default()
        };
        let report = run(&cycle(), &cycle_with_pendant(), &labels(), &config)
            .unwrap_or_else(|e| panic!("{measure}: {e}"));
        assert_eq!(report.records.len(), 3, "{measure}");
    }
}

#[test]
fn rank_changes_on_precomputed_scores() {
    let observed = [(EntityId(1), 0.2), (EntityId(2), 0.4)].into_iter().collect();
    let candidate = [(EntityId(2), 0.1)].into_iter().collect();
    let ranking = rank_changes(&observed, &candidate);
    let order: Vec<u64> = ranking.entries().iter().map(|d| d.node.0).collect();
    assert_eq!(order, vec![2, 1], "-0.3 before -0.2");
}
