//! Trellis Query
//!
//! Resolve read operations against the store.
//!
//! Responsibilities:
//! - List a kind's whole collection
//! - Point lookup by identity
//! - Compute relationship fields (joins) on every read
//! - Shape records to the requested selection

mod error;
mod executor;
mod relation;
mod selection;

pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use relation::{Related, RelationResolver};
pub use selection::{FieldSelection, Selection};
