//! INSERT operation - appends a new record.

use trellis_core::{Attributes, Record, TypeId};
use trellis_registry::Registry;
use trellis_store::Store;
use tracing::{info, warn};

use crate::error::{MutationError, MutationResult};
use crate::executor::DuplicatePolicy;
use crate::result::MutationOutcome;
use crate::validation;

/// Validate `attrs` against the type and append them as a new record.
pub fn execute_insert(
    registry: &Registry,
    store: &mut Store,
    policy: DuplicatePolicy,
    kind: TypeId,
    attrs: Attributes,
) -> MutationResult<MutationOutcome> {
    let type_def = registry
        .get_type(kind)
        .ok_or(MutationError::UnknownType(kind))?;

    let attrs = validation::validate_attributes(type_def, attrs)?;
    validation::check_required_attributes(type_def, &attrs)?;
    let record = Record::new(attrs);

    if let Some(id) = record.identity(&type_def.identity) {
        if store.contains(kind, &id)? {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(MutationError::duplicate_identity(&type_def.name, id));
                }
                DuplicatePolicy::Accept => {
                    warn!(kind = %type_def.name, %id, "inserting duplicate identity; lookups keep returning the first");
                }
            }
        }
    }

    let position = store.push(kind, record.clone())?;
    info!(kind = %type_def.name, position, "record inserted");

    Ok(MutationOutcome::Inserted(record))
}
