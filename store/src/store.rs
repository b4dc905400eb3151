//! Core collection storage implementation.

use crate::alloc::IdAllocator;
use crate::error::{StoreError, StoreResult};
use crate::index::IdentityIndex;
use trellis_core::{Attributes, IdentityKey, Record, TypeId};
use trellis_registry::{Registry, ScalarType};
use std::collections::HashMap;
use tracing::trace;

/// One entity kind's records plus their identity index.
#[derive(Debug, Clone)]
struct Collection {
    /// Type name (for messages).
    type_name: String,
    /// Identity field name.
    identity: String,
    /// Identity field type, used when deriving identities.
    identity_scalar: ScalarType,
    /// Whether identities may be derived by the engine.
    derived: bool,
    /// Records in insertion order.
    records: Vec<Record>,
    /// Identity index over `records`.
    index: IdentityIndex,
    /// Allocator for derived identities.
    id_alloc: IdAllocator,
}

impl Collection {
    fn reindex(&mut self) {
        self.index = IdentityIndex::build(&self.records, &self.identity);
    }
}

/// The in-memory collection store.
#[derive(Debug, Clone)]
pub struct Store {
    collections: HashMap<TypeId, Collection>,
}

impl Store {
    /// Create an empty collection for every type declared in the registry.
    pub fn new(registry: &Registry) -> Self {
        let collections = registry
            .all_types()
            .map(|type_def| {
                let identity_scalar = type_def
                    .identity_attr()
                    .map(|attr| attr.scalar)
                    .unwrap_or(ScalarType::String);
                let collection = Collection {
                    type_name: type_def.name.clone(),
                    identity: type_def.identity.clone(),
                    identity_scalar,
                    derived: type_def.derived_identity,
                    records: Vec::new(),
                    index: IdentityIndex::new(),
                    id_alloc: IdAllocator::new(),
                };
                (type_def.id, collection)
            })
            .collect();

        Self { collections }
    }

    fn collection(&self, kind: TypeId) -> StoreResult<&Collection> {
        self.collections
            .get(&kind)
            .ok_or(StoreError::UnknownKind(kind))
    }

    fn collection_mut(&mut self, kind: TypeId) -> StoreResult<&mut Collection> {
        self.collections
            .get_mut(&kind)
            .ok_or(StoreError::UnknownKind(kind))
    }

    /// All kinds with a collection.
    pub fn kinds(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.collections.keys().copied()
    }

    // ==================== Collection Operations ====================

    /// The full collection for a kind, in insertion order.
    pub fn get_all(&self, kind: TypeId) -> StoreResult<&[Record]> {
        Ok(&self.collection(kind)?.records)
    }

    /// Number of records of a kind.
    pub fn len(&self, kind: TypeId) -> StoreResult<usize> {
        Ok(self.collection(kind)?.records.len())
    }

    /// Returns true if the kind's collection is empty.
    pub fn is_empty(&self, kind: TypeId) -> StoreResult<bool> {
        Ok(self.collection(kind)?.records.is_empty())
    }

    /// Append a record. Returns its position.
    pub fn push(&mut self, kind: TypeId, record: Record) -> StoreResult<usize> {
        let collection = self.collection_mut(kind)?;
        let position = collection.records.len();
        if let Some(key) = record.identity(&collection.identity) {
            collection.id_alloc.observe(&key);
            collection.index.insert(key, position);
        }
        collection.records.push(record);
        trace!(kind = %collection.type_name, position, "record appended");
        Ok(position)
    }

    /// Swap a kind's collection wholesale.
    pub fn replace(&mut self, kind: TypeId, records: Vec<Record>) -> StoreResult<()> {
        let collection = self.collection_mut(kind)?;
        for key in records
            .iter()
            .filter_map(|r| r.identity(&collection.identity))
        {
            collection.id_alloc.observe(&key);
        }
        collection.records = records;
        collection.reindex();
        trace!(kind = %collection.type_name, len = collection.records.len(), "collection replaced");
        Ok(())
    }

    /// Merge a patch into the record at `position`. Returns the updated
    /// record, or None if the position is out of range.
    pub fn merge_at(
        &mut self,
        kind: TypeId,
        position: usize,
        patch: &Attributes,
    ) -> StoreResult<Option<&Record>> {
        let collection = self.collection_mut(kind)?;
        let current = collection
            .records
            .get(position)
            .and_then(|r| r.get(&collection.identity));
        let identity_changed = patch
            .get(&collection.identity)
            .is_some_and(|new| current != Some(new));

        let Some(record) = collection.records.get_mut(position) else {
            return Ok(None);
        };
        record.merge(patch);

        if identity_changed {
            if let Some(key) = collection.records[position].identity(&collection.identity) {
                collection.id_alloc.observe(&key);
            }
            collection.reindex();
        }
        Ok(collection.records.get(position))
    }

    // ==================== Identity Lookups ====================

    /// Name of the identity field of a kind.
    pub fn identity_field(&self, kind: TypeId) -> StoreResult<&str> {
        Ok(&self.collection(kind)?.identity)
    }

    /// First record holding this identity.
    pub fn find_one(&self, kind: TypeId, id: &IdentityKey) -> StoreResult<Option<&Record>> {
        let collection = self.collection(kind)?;
        Ok(collection
            .index
            .first(id)
            .and_then(|position| collection.records.get(position)))
    }

    /// Position of the first record holding this identity.
    pub fn position(&self, kind: TypeId, id: &IdentityKey) -> StoreResult<Option<usize>> {
        Ok(self.collection(kind)?.index.first(id))
    }

    /// Positions of every record holding this identity, in insertion order.
    pub fn positions(&self, kind: TypeId, id: &IdentityKey) -> StoreResult<Vec<usize>> {
        Ok(self.collection(kind)?.index.get(id).to_vec())
    }

    /// Check whether any record holds this identity.
    pub fn contains(&self, kind: TypeId, id: &IdentityKey) -> StoreResult<bool> {
        Ok(self.collection(kind)?.index.contains(id))
    }

    // ==================== Identity Allocation ====================

    /// Allocate a fresh identity for a kind declared with derived identities.
    ///
    /// The value is above every identity the collection has ever held, so it
    /// stays unique after deletions.
    pub fn next_identity(&mut self, kind: TypeId) -> StoreResult<IdentityKey> {
        let collection = self.collection_mut(kind)?;
        if !collection.derived {
            return Err(StoreError::IdentityNotDerivable(
                collection.type_name.clone(),
            ));
        }
        let n = collection
            .id_alloc
            .alloc()
            .ok_or_else(|| StoreError::IdentitySpaceExhausted(collection.type_name.clone()))?;
        Ok(match collection.identity_scalar {
            ScalarType::Int => IdentityKey::Int(n),
            _ => IdentityKey::String(n.to_string()),
        })
    }
}
