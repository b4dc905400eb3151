//! Trellis Store
//!
//! In-memory collection storage with identity lookup:
//! - One ordered collection of records per entity type
//! - Identity index: find records by identity field value
//! - Identity allocator: fresh identities for engine-derived kinds

mod alloc;
mod error;
mod index;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::*;
