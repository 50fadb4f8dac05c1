//! Id → text lookup tables for entities and relations.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{EntityId, RelationId, Triple};

/// Which lookup table an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Entity,
    Relation,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str("entity"),
            Self::Relation => f.write_str("relation"),
        }
    }
}

/// One id → text table, loaded fully into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<u64, String>,
}

impl LabelTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, returning the previous text if the id was already present.
    pub fn insert(&mut self, id: u64, text: impl Into<String>) -> Option<String> {
        self.labels.insert(id, text.into())
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u64, S)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (u64, S)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(id, s)| (id, s.into())).collect(),
        }
    }
}

/// The entity and relation tables used to render triples as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub entities: LabelTable,
    pub relations: LabelTable,
}

impl Labels {
    #[must_use]
    pub const fn new(entities: LabelTable, relations: LabelTable) -> Self {
        Self {
            entities,
            relations,
        }
    }

    /// Text for an entity id. `triple_index` is carried into the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is not in the entity table.
    pub fn entity(&self, id: EntityId, triple_index: usize) -> Result<&str> {
        self.entities.get(id.0).ok_or(Error::Lookup {
            table: LabelKind::Entity,
            id: id.0,
            triple_index,
        })
    }

    /// Text for a relation id. `triple_index` is carried into the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the id is not in the relation table.
    pub fn relation(&self, id: RelationId, triple_index: usize) -> Result<&str> {
        self.relations.get(id.0).ok_or(Error::Lookup {
            table: LabelKind::Relation,
            id: id.0,
            triple_index,
        })
    }

    /// `"<head> <relation> <tail>"` for the triple at `triple_index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] for the first of head, relation, tail that
    /// has no label.
    pub fn render(&self, triple: &Triple, triple_index: usize) -> Result<String> {
        let head = self.entity(triple.head, triple_index)?;
        let relation = self.relation(triple.relation, triple_index)?;
        let tail = self.entity(triple.tail, triple_index)?;
        Ok(format!("{head} {relation} {tail}"))
    }
}
