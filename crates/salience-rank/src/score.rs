//! Triple scoring and top-K selection.
//!
//! A triple's score is the gain of its head plus the gain of its tail; the
//! relation is not scored. [`top_k`] orders triples by descending score
//! with a stable sort, so equal scores keep their original triple order,
//! then resolves labels for the kept triples only.

use std::cmp::Ordering;

use salience_core::{Error, Labels, Result, Triple};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::delta::Gains;

/// Score every triple: `gains[head] + gains[tail]`, one value per triple.
#[must_use]
pub fn score_triples(triples: &[Triple], gains: &Gains) -> Vec<f64> {
    triples
        .iter()
        .map(|t| gains.get(t.head) + gains.get(t.tail))
        .collect()
}

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

/// One selected triple with its label and score.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Index into the observed triple sequence.
    pub triple_id: usize,
    pub endpoints: Triple,
    /// `"<head> <relation> <tail>"`.
    pub label: String,
    pub score: f64,
}

/// The triple id is the key of the enclosing map, so it is not repeated.
impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ResultRecord", 3)?;
        s.serialize_field("endpoints", &self.endpoints)?;
        s.serialize_field("label", &self.label)?;
        s.serialize_field("score", &self.score)?;
        s.end()
    }
}

/// Top-K records in rank order.
///
/// Serializes as a JSON object keyed by the stringified triple index,
/// preserving rank order: `{"0": {"endpoints": [1, 2, 0], ...}, ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopTriples {
    records: Vec<ResultRecord>,
}

impl TopTriples {
    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    /// The record for a triple index, if it made the cut.
    #[must_use]
    pub fn get(&self, triple_id: usize) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.triple_id == triple_id)
    }
}

impl<'a> IntoIterator for &'a TopTriples {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for TopTriples {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.triple_id.to_string(), record)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Keep the `k` highest-scoring triples and label them.
///
/// `scores[i]` belongs to `triples[i]`. `k == 0` returns an empty result;
/// `k` beyond the triple count returns every triple.
///
/// # Errors
///
/// Returns [`Error::Lookup`] if a kept triple's head, relation or tail has
/// no label, and [`Error::Configuration`] if `scores` and `triples` differ
/// in length.
#[instrument(skip(triples, scores, labels), fields(triples = triples.len()))]
pub fn top_k(triples: &[Triple], scores: &[f64], k: usize, labels: &Labels) -> Result<TopTriples> {
    if triples.len() != scores.len() {
        return Err(Error::Configuration(format!(
            "{} scores for {} triples",
            scores.len(),
            triples.len()
        )));
    }

    let mut order: Vec<usize> = (0..triples.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    order.truncate(k);

    let records = order
        .into_iter()
        .map(|i| {
            let endpoints = triples[i];
            Ok(ResultRecord {
                triple_id: i,
                endpoints,
                label: labels.render(&endpoints, i)?,
                score: scores[i],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(kept = records.len(), "selected top triples");
    Ok(TopTriples { records })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
