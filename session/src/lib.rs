//! Trellis Session
//!
//! The outer layer of the engine. It owns the office schema, the store and
//! the table that routes a named root field to its resolver.
//!
//! ```text
//! Request -> Engine::call -> argument check -> DispatchTable handler
//!         -> QueryExecutor / MutationExecutor -> Value -> Response
//! ```

mod config;
mod dispatch;
mod engine;
mod error;
mod request;
mod resolvers;
mod response;
mod schema;
mod seed;

pub use config::EngineConfig;
pub use dispatch::{DispatchTable, Handler};
pub use engine::Engine;
pub use error::{SessionError, SessionResult};
pub use request::{Arguments, Request};
pub use response::{Response, ResponseError};
pub use schema::{office_registry, Entity, FieldSpec, Equipment, Supply, Team, Tweet, User};
pub use seed::{load_seed, OFFICE_SEED};

pub use trellis_mutation::DuplicatePolicy;
pub use trellis_query::{FieldSelection, Selection};
