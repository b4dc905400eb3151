//! Root field dispatch.
//!
//! Every declared root field is routed to exactly one handler. The table is
//! checked against the registry when an engine starts, so a request can only
//! fail on what it sends.

use std::collections::HashMap;

use trellis_core::Value;
use trellis_query::Selection;
use trellis_registry::{OperationGroup, Registry, RootFieldDef};

use crate::engine::Engine;
use crate::error::{SessionError, SessionResult};
use crate::request::Arguments;
use crate::resolvers;
use crate::schema::{
    delete_field, insert_field, update_field, Entity, Equipment, Supply, Team, Tweet, User,
};

/// A root field resolver.
pub type Handler = fn(&Engine, &Arguments, &Selection) -> SessionResult<Value>;

/// Maps `(group, field)` to its handler.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<(OperationGroup, String), Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handlers of the office schema.
    pub fn office() -> Self {
        let mut table = Self::new();
        table.register_entity::<Team>();
        table.register_entity::<Equipment>();
        table.register_entity::<Supply>();
        table.register_entity::<User>();
        table.register_entity::<Tweet>();

        table.register(OperationGroup::Mutation, delete_field::<Team>(), resolvers::delete::<Team>);
        table.register(
            OperationGroup::Mutation,
            delete_field::<Equipment>(),
            resolvers::delete::<Equipment>,
        );
        table.register(
            OperationGroup::Mutation,
            delete_field::<Supply>(),
            resolvers::delete::<Supply>,
        );
        table.register(OperationGroup::Mutation, delete_field::<User>(), resolvers::delete::<User>);

        table.register(OperationGroup::Mutation, "postTweet", resolvers::post_tweet);
        table.register(
            OperationGroup::Mutation,
            delete_field::<Tweet>(),
            resolvers::delete_flag::<Tweet>,
        );
        table
    }

    /// Register the list, get, insert and update handlers of a kind.
    fn register_entity<E: Entity>(&mut self) {
        self.register(OperationGroup::Query, E::LIST_FIELD, resolvers::list::<E>);
        self.register(OperationGroup::Query, E::GET_FIELD, resolvers::get::<E>);
        self.register(OperationGroup::Mutation, insert_field::<E>(), resolvers::insert::<E>);
        self.register(OperationGroup::Mutation, update_field::<E>(), resolvers::update::<E>);
    }

    /// Register a handler, replacing any previous one for the field.
    pub fn register(
        &mut self,
        group: OperationGroup,
        field: impl Into<String>,
        handler: Handler,
    ) -> &mut Self {
        self.handlers.insert((group, field.into()), handler);
        self
    }

    /// Remove a handler.
    pub fn unregister(&mut self, group: OperationGroup, field: &str) -> Option<Handler> {
        self.handlers.remove(&(group, field.to_string()))
    }

    pub fn get(&self, group: OperationGroup, field: &str) -> Option<Handler> {
        self.handlers.get(&(group, field.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check that handlers and declared root fields correspond one to one.
    pub fn check(&self, registry: &Registry) -> SessionResult<()> {
        let mut unhandled: Vec<_> = registry
            .root_fields()
            .filter(|f| !self.handlers.contains_key(&(f.group, f.name.clone())))
            .map(|f| (f.group, f.name.clone()))
            .collect();
        unhandled.sort();
        if let Some((group, field)) = unhandled.into_iter().next() {
            return Err(SessionError::incomplete_dispatch(group, field, "no handler"));
        }

        let mut undeclared: Vec<_> = self
            .handlers
            .keys()
            .filter(|(group, field)| registry.get_root_field(*group, field).is_none())
            .cloned()
            .collect();
        undeclared.sort();
        if let Some((group, field)) = undeclared.into_iter().next() {
            return Err(SessionError::incomplete_dispatch(
                group,
                field,
                "handler for an undeclared field",
            ));
        }

        Ok(())
    }
}

/// Check call arguments against the declared ones and coerce them.
pub(crate) fn validate_arguments(
    def: &RootFieldDef,
    arguments: &Arguments,
) -> SessionResult<Arguments> {
    if let Some((name, _)) = arguments.iter().find(|(name, _)| def.get_arg(name).is_none()) {
        return Err(SessionError::invalid_argument(&def.name, name, "unknown argument"));
    }

    let mut checked = Arguments::new();
    for arg in &def.args {
        match arguments.get(&arg.name) {
            None if arg.required => {
                return Err(SessionError::invalid_argument(&def.name, &arg.name, "missing"));
            }
            Some(Value::Null) if arg.required => {
                return Err(SessionError::invalid_argument(
                    &def.name,
                    &arg.name,
                    "cannot be null",
                ));
            }
            None => {}
            Some(value) => {
                if !arg.scalar.accepts(value) {
                    return Err(SessionError::invalid_argument(
                        &def.name,
                        &arg.name,
                        format!("expected {}, got {}", arg.scalar.name(), value.type_name()),
                    ));
                }
                checked.insert(arg.name.clone(), arg.scalar.coerce(value.clone()));
            }
        }
    }
    Ok(checked)
}
