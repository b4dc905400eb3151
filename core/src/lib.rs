//! Trellis Core Types
//!
//! This crate provides the foundational types used throughout Trellis:
//! - Type identifiers (TypeId, RelationId)
//! - Identity keys used for point lookups (IdentityKey)
//! - Value types (the Value enum with scalar, list and nested record values)
//! - Records (the stored and returned shape of an entity)
//! - Common error types

mod error;
mod id;
mod record;
mod value;

pub use error::*;
pub use id::*;
pub use record::*;
pub use value::*;
