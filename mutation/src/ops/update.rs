//! UPDATE operation - merges a patch into an existing record.

use trellis_core::{Attributes, IdentityKey, TypeId};
use trellis_registry::Registry;
use trellis_store::Store;
use tracing::{debug, info};

use crate::error::{MutationError, MutationResult};
use crate::result::MutationOutcome;
use crate::validation;

/// Merge `patch` into the first record holding `id`.
///
/// Fields absent from the patch are kept. The identity field may appear in
/// the patch only with its current value.
pub fn execute_update(
    registry: &Registry,
    store: &mut Store,
    kind: TypeId,
    id: &IdentityKey,
    patch: Attributes,
) -> MutationResult<MutationOutcome> {
    let type_def = registry
        .get_type(kind)
        .ok_or(MutationError::UnknownType(kind))?;

    let patch = validation::validate_attributes(type_def, patch)?;
    if let Some(new_id) = patch.get(&type_def.identity) {
        if !id.matches(new_id) {
            return Err(MutationError::identity_immutable(
                &type_def.name,
                id.clone(),
                new_id.to_string(),
            ));
        }
    }

    let Some(position) = store.position(kind, id)? else {
        debug!(kind = %type_def.name, %id, "update matched nothing");
        return Ok(MutationOutcome::NotFound);
    };

    let updated = store.merge_at(kind, position, &patch)?.cloned();
    info!(kind = %type_def.name, %id, fields = patch.len(), "record updated");

    Ok(updated
        .map(MutationOutcome::Updated)
        .unwrap_or(MutationOutcome::NotFound))
}
