//! Mutation operation implementations.
//!
//! Each operation (insert, update, delete, post) is implemented
//! in its own module for better organization and testability.

mod delete;
mod insert;
mod post;
mod update;

pub use delete::execute_delete;
pub use insert::execute_insert;
pub use post::execute_post;
pub use update::execute_update;
