//! Mutation error types.

use thiserror::Error;
use trellis_core::{IdentityKey, TypeId};
use trellis_store::StoreError;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during mutation execution.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    #[error("Unknown attribute: {attr} on type {type_name}")]
    UnknownAttribute { type_name: String, attr: String },

    #[error("Invalid attribute type: expected {expected}, got {actual} for {attr}")]
    InvalidAttrType {
        attr: String,
        expected: String,
        actual: String,
    },

    #[error("Missing required attribute: {attr} on type {type_name}")]
    MissingRequired { type_name: String, attr: String },

    #[error("Cannot set required attribute to null: {attr} on type {type_name}")]
    RequiredNullViolation { type_name: String, attr: String },

    #[error("Duplicate identity {id} for type {type_name}")]
    DuplicateIdentity { type_name: String, id: IdentityKey },

    #[error("Identity of {type_name} {id} cannot change to {attempted}")]
    IdentityImmutable {
        type_name: String,
        id: IdentityKey,
        attempted: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MutationError {
    pub fn unknown_attribute(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn invalid_attr_type(
        attr: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidAttrType {
            attr: attr.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_required(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::MissingRequired {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn required_null_violation(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::RequiredNullViolation {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn duplicate_identity(type_name: impl Into<String>, id: IdentityKey) -> Self {
        Self::DuplicateIdentity {
            type_name: type_name.into(),
            id,
        }
    }

    pub fn identity_immutable(
        type_name: impl Into<String>,
        id: IdentityKey,
        attempted: impl Into<String>,
    ) -> Self {
        Self::IdentityImmutable {
            type_name: type_name.into(),
            id,
            attempted: attempted.into(),
        }
    }
}
