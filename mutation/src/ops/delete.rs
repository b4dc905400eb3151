//! DELETE operation - removes records by identity.

use trellis_core::{IdentityKey, Record, TypeId};
use trellis_registry::Registry;
use trellis_store::Store;
use tracing::{debug, info};

use crate::error::{MutationError, MutationResult};
use crate::result::MutationOutcome;

/// Remove every record holding `id` and report the first one.
///
/// The collection is rebuilt without the matches, so a missing identity
/// leaves it untouched.
pub fn execute_delete(
    registry: &Registry,
    store: &mut Store,
    kind: TypeId,
    id: &IdentityKey,
) -> MutationResult<MutationOutcome> {
    let type_def = registry
        .get_type(kind)
        .ok_or(MutationError::UnknownType(kind))?;

    let Some(captured) = store.find_one(kind, id)?.cloned() else {
        debug!(kind = %type_def.name, %id, "delete matched nothing");
        return Ok(MutationOutcome::NotFound);
    };

    let records = store.get_all(kind)?;
    let before = records.len();
    let remaining: Vec<Record> = records
        .iter()
        .filter(|r| {
            !r.get(&type_def.identity)
                .is_some_and(|value| id.matches(value))
        })
        .cloned()
        .collect();
    let removed = before - remaining.len();

    store.replace(kind, remaining)?;
    info!(kind = %type_def.name, %id, removed, "record deleted");

    Ok(MutationOutcome::Deleted {
        record: captured,
        removed,
    })
}
