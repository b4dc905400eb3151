//! POST operation - inserts a record under an engine-derived identity.

use trellis_core::{Attributes, TypeId};
use trellis_registry::Registry;
use trellis_store::Store;

use crate::error::{MutationError, MutationResult};
use crate::executor::DuplicatePolicy;
use crate::ops::execute_insert;
use crate::result::MutationOutcome;

/// Allocate the next identity for `kind` and insert `attrs` under it.
/// Any identity already present in `attrs` is overwritten.
pub fn execute_post(
    registry: &Registry,
    store: &mut Store,
    policy: DuplicatePolicy,
    kind: TypeId,
    mut attrs: Attributes,
) -> MutationResult<MutationOutcome> {
    let type_def = registry
        .get_type(kind)
        .ok_or(MutationError::UnknownType(kind))?;

    let id = store.next_identity(kind)?;
    attrs.insert(type_def.identity.clone(), id.to_value());

    execute_insert(registry, store, policy, kind, attrs)
}
