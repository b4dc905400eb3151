//! Store error types.

use trellis_core::TypeId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No collection exists for this type. The dispatch layer never produces
    /// this for a declared type, so it indicates a programming error.
    #[error("Unknown kind: {0}")]
    UnknownKind(TypeId),

    /// The kind's identities are not numeric, so none can be derived.
    #[error("Cannot derive identity for kind {0}")]
    IdentityNotDerivable(String),

    /// Every derivable identity of the kind has been used.
    #[error("Identity space exhausted for kind {0}")]
    IdentitySpaceExhausted(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
