//! Per-node centrality deltas between the observed and candidate graphs.
//!
//! # Overview
//!
//! [`rank_changes`] walks the observed scores in graph node order and
//! computes `candidate - observed` for each node, treating a node missing
//! from the candidate scores as 0. Nodes that only exist in the candidate
//! graph are ignored: no observed triple can mention them.
//!
//! The result is a [`Ranking`] sorted ascending by delta, so the biggest
//! gainers sit at the tail. The sort is stable over observed node order,
//! which makes tie order reproducible.
//!
//! # Selection
//!
//! [`Ranking::select`] takes the top (last `n`) or bottom (first `n`)
//! entries. [`Gains`] turns a selection into a lookup where unselected
//! nodes contribute 0.

use std::cmp::Ordering;
use std::collections::HashMap;

use salience_core::{EntityId, RankMode};
use serde::Serialize;
use tracing::instrument;

use crate::metrics::NodeScores;

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// One node's score change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeDelta {
    pub node: EntityId,
    pub delta: f64,
}

/// Node deltas sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<NodeDelta>,
}

impl Ranking {
    #[must_use]
    pub fn entries(&self) -> &[NodeDelta] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take `n` entries from one end of the ranking.
    ///
    /// [`RankMode::Top`] returns the last `n` (largest deltas, still in
    /// ascending order); [`RankMode::Bottom`] returns the first `n`. An `n`
    /// beyond the ranking length returns everything.
    #[must_use]
    pub fn select(&self, n: usize, mode: RankMode) -> &[NodeDelta] {
        let n = n.min(self.entries.len());
        match mode {
            RankMode::Top => &self.entries[self.entries.len() - n..],
            RankMode::Bottom => &self.entries[..n],
        }
    }

    /// The delta recorded for `node`, if it is in the observed graph.
    #[must_use]
    pub fn delta(&self, node: EntityId) -> Option<f64> {
        self.entries.iter().find(|d| d.node == node).map(|d| d.delta)
    }

    /// Gains built from a selection of `n` nodes (`None` = all).
    #[must_use]
    pub fn gains(&self, n: Option<usize>, mode: RankMode) -> Gains {
        Gains::from(self.select(n.unwrap_or(self.entries.len()), mode))
    }
}

/// Compute and sort per-node deltas over the observed node set.
#[must_use]
#[instrument(skip_all, fields(observed = observed.len(), candidate = candidate.len()))]
pub fn rank_changes(observed: &NodeScores, candidate: &NodeScores) -> Ranking {
    let mut entries: Vec<NodeDelta> = observed
        .iter()
        .map(|(node, before)| NodeDelta {
            node,
            delta: candidate.get(node).unwrap_or(0.0) - before,
        })
        .collect();

    entries.sort_by(|a, b| a.delta.partial_cmp(&b.delta).unwrap_or(Ordering::Equal));

    Ranking { entries }
}

// ---------------------------------------------------------------------------
// Gains
// ---------------------------------------------------------------------------

/// Node → delta lookup used to score triples. Absent nodes gain 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gains {
    map: HashMap<EntityId, f64>,
}

impl Gains {
    #[must_use]
    pub fn get(&self, node: EntityId) -> f64 {
        self.map.get(&node).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<&[NodeDelta]> for Gains {
    fn from(selection: &[NodeDelta]) -> Self {
        selection.iter().map(|d| (d.node, d.delta)).collect()
    }
}

impl FromIterator<(EntityId, f64)> for Gains {
    fn from_iter<I: IntoIterator<Item = (EntityId, f64)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(u64, f64)]) -> NodeScores {
        pairs.iter().map(|&(id, s)| (EntityId(id), s)).collect()
    }

    fn nodes(slice: &[NodeDelta]) -> Vec<u64> {
        slice.iter().map(|d| d.node.0).collect()
    }

    #[test]
    fn deltas_cover_observed_nodes_only() {
        let observed = scores(&[(1, 0.5), (2, 0.5)]);
        let candidate = scores(&[(1, 0.7), (9, 1.0)]);
        let ranking = rank_changes(&observed, &candidate);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.delta(EntityId(9)), None);
        assert!((ranking.delta(EntityId(2)).expect("2") + 0.5).abs() < 1e-12, "missing = 0");
        assert!((ranking.delta(EntityId(1)).expect("1") - 0.2).abs() < 1e-12);
    }

    #[test]
    fn ranking_is_ascending() {
        let observed = scores(&[(1, 0.0), (2, 0.0), (3, 0.0)]);
        let candidate = scores(&[(1, 0.3), (2, -0.1), (3, 0.1)]);
        let ranking = rank_changes(&observed, &candidate);
        assert_eq!(nodes(ranking.entries()), vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_observed_order() {
        let observed = scores(&[(5, 1.0), (3, 1.0), (4, 1.0)]);
        let candidate = scores(&[(5, 1.0), (3, 1.0), (4, 1.0)]);
        let ranking = rank_changes(&observed, &candidate);
        assert_eq!(nodes(ranking.entries()), vec![5, 3, 4]);
    }

    #[test]
    fn select_top_and_bottom() {
        let observed = scores(&[(1, 0.0), (2, 0.0), (3, 0.0), (4, 0.0)]);
        let candidate = scores(&[(1, 4.0), (2, 3.0), (3, 2.0), (4, 1.0)]);
        let ranking = rank_changes(&observed, &candidate);

        assert_eq!(nodes(ranking.select(2, RankMode::Top)), vec![2, 1]);
        assert_eq!(nodes(ranking.select(1, RankMode::Bottom)), vec![4]);
        assert_eq!(ranking.select(10, RankMode::Top).len(), 4);
        assert!(ranking.select(0, RankMode::Top).is_empty());
    }

    #[test]
    fn gains_zero_for_unselected() {
        let observed = scores(&[(1, 0.0), (2, 0.0), (3, 0.0)]);
        let candidate = scores(&[(1, 0.3), (2, -0.2), (3, 0.1)]);
        let ranking = rank_changes(&observed, &candidate);

        let gains = ranking.gains(Some(1), RankMode::Top);
        assert_eq!(gains.len(), 1);
        assert!((gains.get(EntityId(1)) - 0.3).abs() < 1e-12);
        assert!((gains.get(EntityId(3)) - 0.0).abs() < 1e-12);
        assert!((gains.get(EntityId(42)) - 0.0).abs() < 1e-12);

        let all = ranking.gains(None, RankMode::Top);
        assert_eq!(all.len(), 3);
        assert!((all.get(EntityId(2)) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_give_empty_ranking() {
        let ranking = rank_changes(&NodeScores::default(), &scores(&[(1, 1.0)]));
        assert!(ranking.is_empty());
        assert!(ranking.select(3, RankMode::Bottom).is_empty());
    }
}
