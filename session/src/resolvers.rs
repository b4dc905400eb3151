//! Root field resolvers of the office schema.

use trellis_core::{attrs, Value};
use trellis_query::Selection;

use crate::engine::Engine;
use crate::error::SessionResult;
use crate::request::Arguments;
use crate::schema::{delete_field, update_field, Entity, Tweet};

pub(crate) fn list<E: Entity>(
    engine: &Engine,
    _arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let records = engine.read(|query| query.list_all(kind, selection))?;
    Ok(Value::List(records.into_iter().map(Value::Record).collect()))
}

pub(crate) fn get<E: Entity>(
    engine: &Engine,
    arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let id = arguments.identity(E::GET_FIELD, E::IDENTITY.0)?;
    let found = engine.read(|query| query.get_by_identity(kind, &id, selection))?;
    Ok(Value::from(found))
}

pub(crate) fn insert<E: Entity>(
    engine: &Engine,
    arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let attrs = arguments.to_attributes();
    engine.write_shaped(kind, selection, |mutation| mutation.insert(kind, attrs))
}

pub(crate) fn update<E: Entity>(
    engine: &Engine,
    arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let (identity, _) = E::IDENTITY;
    let id = arguments.identity(&update_field::<E>(), identity)?;
    let patch = arguments.attributes_without(identity);
    engine.write_shaped(kind, selection, |mutation| mutation.update(kind, &id, patch))
}

/// Delete returning the removed record.
pub(crate) fn delete<E: Entity>(
    engine: &Engine,
    arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let id = arguments.identity(&delete_field::<E>(), E::IDENTITY.0)?;
    engine.write_shaped(kind, selection, |mutation| mutation.delete(kind, &id))
}

/// Delete returning whether anything was removed.
pub(crate) fn delete_flag<E: Entity>(
    engine: &Engine,
    arguments: &Arguments,
    _selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(E::NAME)?;
    let id = arguments.identity(&delete_field::<E>(), E::IDENTITY.0)?;
    let outcome = engine.write(|mutation| mutation.delete(kind, &id))?;
    Ok(Value::Bool(outcome.is_found()))
}

pub(crate) fn post_tweet(
    engine: &Engine,
    arguments: &Arguments,
    selection: &Selection,
) -> SessionResult<Value> {
    let kind = engine.kind_of(Tweet::NAME)?;
    let text = arguments.string("postTweet", "text")?;
    let user_id = arguments.get("userId").cloned().unwrap_or_default();
    let attrs = attrs! { "text" => text, "user_id" => user_id };
    engine.write_shaped(kind, selection, |mutation| mutation.post(kind, attrs))
}
