//! Query error types.

use thiserror::Error;
use trellis_core::TypeId;
use trellis_store::StoreError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur during query resolution.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    #[error("Unknown field: {field} on type {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Cannot select subfields of scalar field {field} on type {type_name}")]
    ScalarSubselection { type_name: String, field: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn scalar_subselection(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ScalarSubselection {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
