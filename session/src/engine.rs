//! The engine: registry, store and dispatch table behind one handle.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};
use trellis_core::{Record, TypeId, Value};
use trellis_mutation::{MutationExecutor, MutationOutcome, MutationResult};
use trellis_query::{QueryExecutor, QueryResult, Selection};
use trellis_registry::Registry;
use trellis_store::Store;

use crate::config::EngineConfig;
use crate::dispatch::{validate_arguments, DispatchTable};
use crate::error::{SessionError, SessionResult};
use crate::request::Request;
use crate::response::Response;
use crate::schema::office_registry;
use crate::seed::{load_seed, OFFICE_SEED};

/// A query engine over one in-memory store.
///
/// Clones share the store. Queries hold the read lock; each mutation holds
/// the write lock for its whole read-modify-write sequence.
#[derive(Clone)]
pub struct Engine {
    registry: Arc<Registry>,
    store: Arc<RwLock<Store>>,
    dispatch: Arc<DispatchTable>,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with an empty store.
    ///
    /// Fails if the dispatch table does not cover the registry's root fields
    /// exactly.
    pub fn new(
        registry: Registry,
        dispatch: DispatchTable,
        config: EngineConfig,
    ) -> SessionResult<Self> {
        dispatch.check(&registry)?;
        let store = Store::new(&registry);
        info!(
            types = registry.type_count(),
            handlers = dispatch.len(),
            "engine ready"
        );

        Ok(Self {
            registry: Arc::new(registry),
            store: Arc::new(RwLock::new(store)),
            dispatch: Arc::new(dispatch),
            config,
        })
    }

    /// The office schema with the bundled seed and default configuration.
    pub fn office() -> SessionResult<Self> {
        Self::with_seed(EngineConfig::default(), OFFICE_SEED)
    }

    /// The office schema with the bundled seed.
    pub fn office_with(config: EngineConfig) -> SessionResult<Self> {
        Self::with_seed(config, OFFICE_SEED)
    }

    /// The office schema loaded from a seed document.
    pub fn with_seed(config: EngineConfig, seed: &str) -> SessionResult<Self> {
        let engine = Self::new(office_registry()?, DispatchTable::office(), config)?;
        engine.load(seed)?;
        Ok(engine)
    }

    /// Load a seed document into the store.
    pub fn load(&self, seed: &str) -> SessionResult<usize> {
        let mut store = self.store.write();
        load_seed(&self.registry, &mut store, self.config.duplicate_policy, seed)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The stored records of a kind, as held by the store.
    pub fn records(&self, type_name: &str) -> SessionResult<Vec<Record>> {
        let kind = self.kind_of(type_name)?;
        let store = self.store.read();
        Ok(store.get_all(kind)?.to_vec())
    }

    /// Run a request, returning the root field's value.
    #[tracing::instrument(skip_all, fields(group = %request.group, field = %request.field))]
    pub fn call(&self, request: &Request) -> SessionResult<Value> {
        let def = self
            .registry
            .get_root_field(request.group, &request.field)
            .ok_or_else(|| SessionError::unknown_field(request.group, &request.field))?;
        let handler = self
            .dispatch
            .get(request.group, &request.field)
            .ok_or_else(|| {
                SessionError::incomplete_dispatch(request.group, &request.field, "no handler")
            })?;

        let arguments = validate_arguments(def, &request.arguments)?;
        debug!(arguments = arguments.len(), "dispatching");
        handler(self, &arguments, &request.selection)
    }

    /// Run a request, reporting failures in the response.
    pub fn execute(&self, request: &Request) -> Response {
        match self.call(request) {
            Ok(value) => Response::ok(&request.field, &value),
            Err(err) => {
                if err.is_fatal() {
                    error!(field = %request.field, error = %err, "registry and store disagree");
                } else {
                    warn!(field = %request.field, error = %err, "request failed");
                }
                Response::failed(&err)
            }
        }
    }

    /// Parse and run a request document.
    pub fn execute_json(&self, input: &str) -> Response {
        match Request::from_json(input) {
            Ok(request) => self.execute(&request),
            Err(err) => {
                warn!(error = %err, "malformed request");
                Response::failed(&err)
            }
        }
    }

    pub(crate) fn kind_of(&self, type_name: &str) -> SessionResult<TypeId> {
        self.registry
            .get_type_id(type_name)
            .ok_or_else(|| SessionError::UnknownType(type_name.to_string()))
    }

    /// Run a read under the read lock.
    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&QueryExecutor<'_, '_>) -> QueryResult<T>,
    ) -> SessionResult<T> {
        let store = self.store.read();
        let query = QueryExecutor::new(&self.registry, &store)
            .with_default_depth(self.config.default_depth);
        Ok(f(&query)?)
    }

    /// Run a mutation under the write lock.
    pub(crate) fn write(
        &self,
        f: impl FnOnce(&mut MutationExecutor<'_, '_>) -> MutationResult<MutationOutcome>,
    ) -> SessionResult<MutationOutcome> {
        let mut store = self.store.write();
        let mut mutation =
            MutationExecutor::new(&self.registry, &mut store).with_policy(self.config.duplicate_policy);
        Ok(f(&mut mutation)?)
    }

    /// Run a mutation and shape the affected record, both under the write
    /// lock. Null when nothing matched.
    pub(crate) fn write_shaped(
        &self,
        kind: TypeId,
        selection: &Selection,
        f: impl FnOnce(&mut MutationExecutor<'_, '_>) -> MutationResult<MutationOutcome>,
    ) -> SessionResult<Value> {
        let mut store = self.store.write();
        let outcome = {
            let mut mutation = MutationExecutor::new(&self.registry, &mut store)
                .with_policy(self.config.duplicate_policy);
            f(&mut mutation)?
        };

        let query = QueryExecutor::new(&self.registry, &store)
            .with_default_depth(self.config.default_depth);
        let shaped = outcome
            .record()
            .map(|record| query.resolve_record(kind, record, selection))
            .transpose()?;
        Ok(Value::from(shaped))
    }
}
