//! Trellis Mutation
//!
//! Execute write operations (insert/update/delete/post).
//!
//! Responsibilities:
//! - Validate written attributes against the schema
//! - Enforce identity semantics (duplicate policy, immutable identity)
//! - Apply writes to the store
//! - Return the affected record
//!
//! # Module Structure
//!
//! - `executor` - Main MutationExecutor that coordinates operations
//! - `ops/` - Individual operation implementations (insert, update, delete, post)
//! - `validation` - Shared attribute validation helpers
//! - `error` - Error types for mutation failures
//! - `result` - Result types for mutation outcomes

mod error;
mod executor;
mod ops;
mod result;
mod validation;

pub use error::{MutationError, MutationResult};
pub use executor::{DuplicatePolicy, MutationExecutor};
pub use result::MutationOutcome;
