//! Relationship resolution: joins computed fresh on every read.

use trellis_core::{IdentityKey, Record};
use trellis_registry::{Registry, RelationDef, RelationKind};
use trellis_store::Store;

use crate::{QueryError, QueryResult};

/// Records a relationship field resolved to, borrowed from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Related<'s> {
    /// Has-many: every matching child, in collection order.
    Many(Vec<&'s Record>),
    /// Belongs-to: the referenced parent, if present.
    One(Option<&'s Record>),
}

impl<'s> Related<'s> {
    /// Number of records resolved.
    pub fn len(&self) -> usize {
        match self {
            Related::Many(records) => records.len(),
            Related::One(record) => usize::from(record.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes relationship fields over the current store contents.
///
/// Nothing is cached, so results always reflect the latest writes.
pub struct RelationResolver<'r, 's> {
    registry: &'r Registry,
    store: &'s Store,
}

impl<'r, 's> RelationResolver<'r, 's> {
    pub fn new(registry: &'r Registry, store: &'s Store) -> Self {
        Self { registry, store }
    }

    /// Resolve `relation` for one parent record of the relation's owner type.
    pub fn resolve(&self, relation: &RelationDef, parent: &Record) -> QueryResult<Related<'s>> {
        match relation.kind {
            RelationKind::HasMany => self.resolve_many(relation, parent).map(Related::Many),
            RelationKind::BelongsTo => self.resolve_one(relation, parent).map(Related::One),
        }
    }

    /// Every target record whose foreign key equals the parent's identity.
    fn resolve_many(&self, relation: &RelationDef, parent: &Record) -> QueryResult<Vec<&'s Record>> {
        let owner = self
            .registry
            .get_type(relation.owner)
            .ok_or(QueryError::UnknownType(relation.owner))?;

        // A parent without a valid identity has no children
        let Some(parent_id) = parent.identity(&owner.identity) else {
            return Ok(Vec::new());
        };

        Ok(self
            .store
            .get_all(relation.target)?
            .iter()
            .filter(|child| {
                child
                    .get(&relation.foreign_key)
                    .is_some_and(|fk| parent_id.matches(fk))
            })
            .collect())
    }

    /// The target record whose identity equals the parent's foreign key.
    fn resolve_one(&self, relation: &RelationDef, parent: &Record) -> QueryResult<Option<&'s Record>> {
        let Some(key) = parent
            .get(&relation.foreign_key)
            .and_then(IdentityKey::from_value)
        else {
            return Ok(None);
        };
        Ok(self.store.find_one(relation.target, &key)?)
    }
}
