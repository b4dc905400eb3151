//! Mutation executor - coordinates mutation operations.
//!
//! The executor delegates to specialized operation modules in `ops/`:
//! - `ops/insert.rs` - INSERT (append a record)
//! - `ops/update.rs` - UPDATE (merge a patch by identity)
//! - `ops/delete.rs` - DELETE (remove by identity)
//! - `ops/post.rs` - POST (insert under a derived identity)

use serde::{Deserialize, Serialize};
use trellis_core::{Attributes, IdentityKey, TypeId};
use trellis_registry::Registry;
use trellis_store::Store;

use crate::error::MutationResult;
use crate::ops;
use crate::result::MutationOutcome;

/// What an insert does when the identity is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateIdentity`.
    #[default]
    Reject,
    /// Append anyway. Lookups and updates see the first record; deletes
    /// remove all of them.
    Accept,
}

/// Mutation executor.
pub struct MutationExecutor<'r, 's> {
    registry: &'r Registry,
    store: &'s mut Store,
    policy: DuplicatePolicy,
}

impl<'r, 's> MutationExecutor<'r, 's> {
    /// Create a new executor that rejects duplicate identities.
    pub fn new(registry: &'r Registry, store: &'s mut Store) -> Self {
        Self {
            registry,
            store,
            policy: DuplicatePolicy::default(),
        }
    }

    /// Set the duplicate identity policy.
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Insert a record.
    pub fn insert(&mut self, kind: TypeId, attrs: Attributes) -> MutationResult<MutationOutcome> {
        ops::execute_insert(self.registry, self.store, self.policy, kind, attrs)
    }

    /// Merge a patch into the record holding `id`.
    pub fn update(
        &mut self,
        kind: TypeId,
        id: &IdentityKey,
        patch: Attributes,
    ) -> MutationResult<MutationOutcome> {
        ops::execute_update(self.registry, self.store, kind, id, patch)
    }

    /// Delete the records holding `id`.
    pub fn delete(&mut self, kind: TypeId, id: &IdentityKey) -> MutationResult<MutationOutcome> {
        ops::execute_delete(self.registry, self.store, kind, id)
    }

    /// Insert a record under a freshly derived identity.
    pub fn post(&mut self, kind: TypeId, attrs: Attributes) -> MutationResult<MutationOutcome> {
        ops::execute_post(self.registry, self.store, self.policy, kind, attrs)
    }
}
