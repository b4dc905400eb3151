//! Query execution.

use trellis_core::{IdentityKey, Record, TypeId, Value};
use trellis_registry::{Registry, TypeDef};
use trellis_store::Store;
use tracing::debug;

use crate::relation::{Related, RelationResolver};
use crate::selection::Selection;
use crate::{QueryError, QueryResult};

/// Query executor.
///
/// Reads never touch the store's records: every result is a freshly built
/// record with relationship fields filled in.
pub struct QueryExecutor<'r, 's> {
    registry: &'r Registry,
    store: &'s Store,
    relations: RelationResolver<'r, 's>,
    /// How many levels of relationship fields the default selection expands.
    default_depth: usize,
}

impl<'r, 's> QueryExecutor<'r, 's> {
    /// Create a new executor expanding one level of relationships by default.
    pub fn new(registry: &'r Registry, store: &'s Store) -> Self {
        Self {
            registry,
            store,
            relations: RelationResolver::new(registry, store),
            default_depth: 1,
        }
    }

    /// Set the relationship depth of the default selection.
    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    /// Every record of a kind, in collection order.
    pub fn list_all(&self, kind: TypeId, selection: &Selection) -> QueryResult<Vec<Record>> {
        let type_def = self.type_def(kind)?;
        let records = self.store.get_all(kind)?;
        debug!(kind = %type_def.name, count = records.len(), "list_all");

        records
            .iter()
            .map(|record| self.shape(type_def, record, selection, 0))
            .collect()
    }

    /// The first record whose identity equals `id`, or None.
    pub fn get_by_identity(
        &self,
        kind: TypeId,
        id: &IdentityKey,
        selection: &Selection,
    ) -> QueryResult<Option<Record>> {
        let type_def = self.type_def(kind)?;
        let found = self.store.find_one(kind, id)?;
        debug!(kind = %type_def.name, %id, found = found.is_some(), "get_by_identity");

        found
            .map(|record| self.shape(type_def, record, selection, 0))
            .transpose()
    }

    /// Shape a record of `kind` to a selection. Used for mutation results too.
    pub fn resolve_record(
        &self,
        kind: TypeId,
        record: &Record,
        selection: &Selection,
    ) -> QueryResult<Record> {
        let type_def = self.type_def(kind)?;
        self.shape(type_def, record, selection, 0)
    }

    fn type_def(&self, kind: TypeId) -> QueryResult<&'r TypeDef> {
        self.registry
            .get_type(kind)
            .ok_or(QueryError::UnknownType(kind))
    }

    /// Build the response record for `record` at relationship depth `depth`.
    fn shape(
        &self,
        type_def: &TypeDef,
        record: &Record,
        selection: &Selection,
        depth: usize,
    ) -> QueryResult<Record> {
        match selection {
            Selection::Default => {
                let mut out = record.clone();
                if depth < self.default_depth {
                    for relation in self.registry.relations_of(type_def.id) {
                        let value = self.resolve_relation(relation, record, &Selection::Default, depth)?;
                        out.set(relation.name.clone(), value);
                    }
                }
                Ok(out)
            }
            Selection::Fields(fields) => {
                let mut out = Record::default();
                for field in fields {
                    if let Some(relation) = self.registry.get_relation_by_name(type_def.id, &field.name) {
                        let nested = field.selection.clone().unwrap_or_default();
                        let value = self.resolve_relation(relation, record, &nested, depth)?;
                        out.set(field.name.clone(), value);
                    } else if type_def.has_attr(&field.name) {
                        if field.selection.is_some() {
                            return Err(QueryError::scalar_subselection(&type_def.name, &field.name));
                        }
                        let value = record.get(&field.name).cloned().unwrap_or(Value::Null);
                        out.set(field.name.clone(), value);
                    } else {
                        return Err(QueryError::unknown_field(&type_def.name, &field.name));
                    }
                }
                Ok(out)
            }
        }
    }

    fn resolve_relation(
        &self,
        relation: &trellis_registry::RelationDef,
        parent: &Record,
        selection: &Selection,
        depth: usize,
    ) -> QueryResult<Value> {
        let target = self.type_def(relation.target)?;
        Ok(match self.relations.resolve(relation, parent)? {
            Related::Many(children) => Value::List(
                children
                    .into_iter()
                    .map(|child| self.shape(target, child, selection, depth + 1).map(Value::Record))
                    .collect::<QueryResult<Vec<_>>>()?,
            ),
            Related::One(Some(related)) => {
                Value::Record(self.shape(target, related, selection, depth + 1)?)
            }
            Related::One(None) => Value::Null,
        })
    }
}
