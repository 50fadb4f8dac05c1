//! Integer-encoded knowledge-graph facts.
//!
//! A [`Triple`] is `(head, tail, relation)` in the column order of the input
//! files. A [`TripleSet`] is the de-duplicated sequence of triples for one
//! graph: duplicates collapse onto their first occurrence and first-seen
//! order is kept, so a triple's position is a stable id for the whole run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity (node) id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

/// Relation (edge label) id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub u64);

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for RelationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `(head, tail, relation)` fact.
///
/// Serializes as the three-element array `[head, tail, relation]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u64; 3]", from = "[u64; 3]")]
pub struct Triple {
    pub head: EntityId,
    pub tail: EntityId,
    pub relation: RelationId,
}

impl Triple {
    #[must_use]
    pub const fn new(head: u64, tail: u64, relation: u64) -> Self {
        Self {
            head: EntityId(head),
            tail: EntityId(tail),
            relation: RelationId(relation),
        }
    }

    /// True when head and tail are the same entity.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.head == self.tail
    }
}

impl From<[u64; 3]> for Triple {
    fn from([head, tail, relation]: [u64; 3]) -> Self {
        Self::new(head, tail, relation)
    }
}

impl From<Triple> for [u64; 3] {
    fn from(t: Triple) -> Self {
        [t.head.0, t.tail.0, t.relation.0]
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.head, self.tail, self.relation)
    }
}

/// De-duplicated triples in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleSet {
    triples: Vec<Triple>,
    duplicates: usize,
}

impl TripleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `triple` unless it is already present. Returns whether it was new.
    ///
    /// This is a linear scan; bulk loads go through `FromIterator`.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            self.duplicates += 1;
            false
        } else {
            self.triples.push(triple);
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of input rows that collapsed onto an earlier identical row.
    #[must_use]
    pub const fn duplicates_collapsed(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Triple> {
        self.triples.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for TripleSet {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut triples = Vec::new();
        let mut duplicates = 0;
        for triple in iter {
            if seen.insert(triple) {
                triples.push(triple);
            } else {
                duplicates += 1;
            }
        }
        Self {
            triples,
            duplicates,
        }
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let set: TripleSet = [
            Triple::new(1, 2, 0),
            Triple::new(2, 3, 0),
            Triple::new(1, 2, 0),
            Triple::new(1, 2, 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.as_slice(),
            &[Triple::new(1, 2, 0), Triple::new(2, 3, 0), Triple::new(1, 2, 5)]
        );
        assert_eq!(set.duplicates_collapsed(), 1);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = TripleSet::new();
        assert!(set.insert(Triple::new(4, 4, 1)));
        assert!(!set.insert(Triple::new(4, 4, 1)));
        assert_eq!(set.len(), 1);
        assert!(set.get(0).is_some_and(Triple::is_self_loop));
    }

    #[test]
    fn triple_serializes_as_array() {
        let json = serde_json::to_string(&Triple::new(7, 8, 9)).expect("serialize");
        assert_eq!(json, "[7,8,9]");
        let back: Triple = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Triple::new(7, 8, 9));
    }
}
