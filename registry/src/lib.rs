//! Trellis Registry
//!
//! Runtime schema lookup. Single source of truth for entity types, identity
//! fields, relationship fields and the root Query/Mutation fields.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
mod registry;
mod types;

pub use builder::{
    RegistryBuilder, RegistryError, RelationBuilder, RootFieldBuilder, TypeBuilder,
};
pub use registry::Registry;
pub use types::*;
