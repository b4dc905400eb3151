//! Attribute validation helpers for mutation operations.

use trellis_core::{Attributes, Value};
use trellis_registry::TypeDef;

use crate::error::{MutationError, MutationResult};

/// Validate an attribute assignment against the type and bring the value
/// into its stored form.
pub fn validate_attribute(type_def: &TypeDef, attr_name: &str, value: Value) -> MutationResult<Value> {
    let Some(attr_def) = type_def.get_attr(attr_name) else {
        return Err(MutationError::unknown_attribute(&type_def.name, attr_name));
    };

    // Check if trying to set a required attribute to null
    if attr_def.required && value.is_null() {
        return Err(MutationError::required_null_violation(&type_def.name, attr_name));
    }

    if !attr_def.scalar.accepts(&value) {
        return Err(MutationError::invalid_attr_type(
            attr_name,
            attr_def.scalar.name(),
            value.type_name(),
        ));
    }

    Ok(attr_def.scalar.coerce(value))
}

/// Validate every attribute of a write.
pub fn validate_attributes(type_def: &TypeDef, attrs: Attributes) -> MutationResult<Attributes> {
    attrs
        .into_iter()
        .map(|(name, value)| {
            let value = validate_attribute(type_def, &name, value)?;
            Ok((name, value))
        })
        .collect()
}

/// Check that all required attributes are present.
pub fn check_required_attributes(type_def: &TypeDef, attrs: &Attributes) -> MutationResult<()> {
    let mut required: Vec<_> = type_def
        .attributes
        .values()
        .filter(|attr| attr.required)
        .collect();
    // Report the identity first, then alphabetically, so errors are stable
    required.sort_by_key(|attr| (attr.name != type_def.identity, attr.name.clone()));

    for attr_def in required {
        if !attrs.contains_key(&attr_def.name) {
            return Err(MutationError::missing_required(&type_def.name, &attr_def.name));
        }
    }
    Ok(())
}
