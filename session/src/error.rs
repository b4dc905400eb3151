//! Session error types.

use thiserror::Error;
use trellis_core::CoreError;
use trellis_registry::{OperationGroup, RegistryError};
use trellis_store::StoreError;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Schema declaration error.
    #[error("registry error: {0}")]
    RegistryError(#[from] RegistryError),

    /// Value conversion error.
    #[error("value error: {0}")]
    CoreError(#[from] CoreError),

    /// Store access error.
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    /// Query error.
    #[error("query error: {0}")]
    QueryError(#[from] trellis_query::QueryError),

    /// Mutation error.
    #[error("mutation error: {0}")]
    MutationError(#[from] trellis_mutation::MutationError),

    /// Malformed JSON document.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No root field with this name in the group.
    #[error("unknown field: {group}.{field}")]
    UnknownField { group: OperationGroup, field: String },

    /// A handler refers to a type the registry does not declare.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Root fields and handlers disagree.
    #[error("incomplete dispatch for {group}.{field}: {message}")]
    IncompleteDispatch {
        group: OperationGroup,
        field: String,
        message: String,
    },

    /// Argument rejected before the resolver ran.
    #[error("invalid argument {arg} for {field}: {message}")]
    InvalidArgument {
        field: String,
        arg: String,
        message: String,
    },

    /// Seed document rejected.
    #[error("seed error: {message}")]
    SeedError { message: String },
}

impl SessionError {
    pub fn unknown_field(group: OperationGroup, field: impl Into<String>) -> Self {
        Self::UnknownField {
            group,
            field: field.into(),
        }
    }

    pub fn incomplete_dispatch(
        group: OperationGroup,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::IncompleteDispatch {
            group,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(
        field: impl Into<String>,
        arg: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            arg: arg.into(),
            message: message.into(),
        }
    }

    pub fn seed_error(message: impl Into<String>) -> Self {
        Self::SeedError {
            message: message.into(),
        }
    }

    /// Errors that mean the registry and the store disagree. Nothing a
    /// caller sends can produce one once the dispatch table is checked.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SessionError::StoreError(StoreError::UnknownKind(_))
                | SessionError::QueryError(trellis_query::QueryError::Store(StoreError::UnknownKind(_)))
                | SessionError::MutationError(trellis_mutation::MutationError::Store(
                    StoreError::UnknownKind(_)
                ))
                | SessionError::IncompleteDispatch { .. }
        )
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
