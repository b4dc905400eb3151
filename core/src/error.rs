//! Common error types for Trellis.

use thiserror::Error;

/// Errors that can occur while converting values at the edges of the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON number that is not a 64-bit integer.
    #[error("Unsupported number: {0} (only 64-bit integers are supported)")]
    UnsupportedNumber(String),

    /// A record was expected but something else was found.
    #[error("Expected an object, got {0}")]
    NotAnObject(String),

    /// Value cannot serve as an identity.
    #[error("Invalid identity value: {0}")]
    InvalidIdentity(String),
}

/// Result type for core conversions.
pub type CoreResult<T> = Result<T, CoreError>;
