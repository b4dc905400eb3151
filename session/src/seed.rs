//! Seed documents: `{"<Type>": [record, ...], ...}`.

use trellis_core::Record;
use trellis_mutation::{DuplicatePolicy, MutationExecutor};
use trellis_registry::Registry;
use trellis_store::Store;
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};

/// The bundled office data.
pub const OFFICE_SEED: &str = include_str!("../seed/office.json");

/// Insert every record of a seed document, validating each like an insert.
/// Returns the number of records loaded.
///
/// Records are staged on a copy of the store, which replaces the live one
/// only once the whole document has loaded. On error the store is unchanged.
pub fn load_seed(
    registry: &Registry,
    store: &mut Store,
    policy: DuplicatePolicy,
    input: &str,
) -> SessionResult<usize> {
    let doc: serde_json::Value = serde_json::from_str(input)?;
    let Some(kinds) = doc.as_object() else {
        return Err(SessionError::seed_error("expected an object of type names"));
    };

    let mut staged = store.clone();
    let mut executor = MutationExecutor::new(registry, &mut staged).with_policy(policy);
    let mut loaded = 0;
    for (type_name, records) in kinds {
        let type_def = registry
            .get_type_by_name(type_name)
            .ok_or_else(|| SessionError::seed_error(format!("unknown type {}", type_name)))?;
        let Some(records) = records.as_array() else {
            return Err(SessionError::seed_error(format!(
                "records of {} must be a list",
                type_name
            )));
        };

        for json in records {
            let record = Record::from_json(json)?;
            executor.insert(type_def.id, record.into_attributes())?;
        }
        debug!(kind = %type_name, count = records.len(), "seeded");
        loaded += records.len();
    }

    *store = staged;
    info!(records = loaded, "seed loaded");
    Ok(loaded)
}
