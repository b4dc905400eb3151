//! Requests: a root field, its arguments and the wanted selection.

use std::collections::BTreeMap;

use serde::Deserialize;
use trellis_core::{Attributes, IdentityKey, Value};
use trellis_query::Selection;
use trellis_registry::OperationGroup;

use crate::error::{SessionError, SessionResult};

/// Arguments of a root field call, by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read an identity argument.
    pub fn identity(&self, field: &str, name: &str) -> SessionResult<IdentityKey> {
        let value = self
            .get(name)
            .ok_or_else(|| SessionError::invalid_argument(field, name, "missing"))?;
        IdentityKey::from_value(value).ok_or_else(|| {
            SessionError::invalid_argument(
                field,
                name,
                format!("{} cannot be an identity", value.type_name()),
            )
        })
    }

    /// Read a required string argument.
    pub fn string(&self, field: &str, name: &str) -> SessionResult<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| SessionError::invalid_argument(field, name, "expected a string"))
    }

    /// All arguments as record attributes.
    pub fn to_attributes(&self) -> Attributes {
        self.0.clone()
    }

    /// All arguments except one, as record attributes.
    pub fn attributes_without(&self, name: &str) -> Attributes {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != name)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn from_json(json: &serde_json::Map<String, serde_json::Value>) -> SessionResult<Self> {
        json.iter()
            .map(|(name, value)| Ok((name.clone(), Value::from_json(value)?)))
            .collect::<SessionResult<BTreeMap<_, _>>>()
            .map(Arguments)
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Arguments(iter.into_iter().collect())
    }
}

/// A call of one root field.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub group: OperationGroup,
    pub field: String,
    pub arguments: Arguments,
    pub selection: Selection,
}

/// Wire form of a request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    #[serde(default)]
    mutation: bool,
    field: String,
    #[serde(default)]
    arguments: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    selection: Option<serde_json::Value>,
}

impl Request {
    fn new(group: OperationGroup, field: impl Into<String>) -> Self {
        Self {
            group,
            field: field.into(),
            arguments: Arguments::new(),
            selection: Selection::Default,
        }
    }

    /// A Query root field call.
    pub fn query(field: impl Into<String>) -> Self {
        Self::new(OperationGroup::Query, field)
    }

    /// A Mutation root field call.
    pub fn mutation(field: impl Into<String>) -> Self {
        Self::new(OperationGroup::Mutation, field)
    }

    /// Add an argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name, value.into());
        self
    }

    /// Set the selection.
    pub fn select(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Parse a request document.
    ///
    /// ```text
    /// {"mutation": true, "field": "updateTeam",
    ///  "arguments": {"id": 1, "mascot": "owl"},
    ///  "selection": ["id", {"supplies": ["id"]}]}
    /// ```
    pub fn from_json(input: &str) -> SessionResult<Self> {
        let raw: RawRequest = serde_json::from_str(input)?;
        let group = if raw.mutation {
            OperationGroup::Mutation
        } else {
            OperationGroup::Query
        };
        let selection = match &raw.selection {
            Some(json) => parse_selection(&raw.field, json)?,
            None => Selection::Default,
        };

        Ok(Self {
            group,
            arguments: Arguments::from_json(&raw.arguments)?,
            field: raw.field,
            selection,
        })
    }
}

/// A selection is `null` (default) or a list whose items are field names or
/// single-key objects mapping a relationship field to its own selection.
fn parse_selection(field: &str, json: &serde_json::Value) -> SessionResult<Selection> {
    let items = match json {
        serde_json::Value::Null => return Ok(Selection::Default),
        serde_json::Value::Array(items) => items,
        other => {
            return Err(SessionError::invalid_argument(
                field,
                "selection",
                format!("expected a list, got {}", other),
            ))
        }
    };

    let mut selection = Selection::fields();
    for item in items {
        match item {
            serde_json::Value::String(name) => selection = selection.field(name.clone()),
            serde_json::Value::Object(nested) => {
                for (name, inner) in nested {
                    selection = selection.nested(name.clone(), parse_selection(field, inner)?);
                }
            }
            other => {
                return Err(SessionError::invalid_argument(
                    field,
                    "selection",
                    format!("unexpected selection item {}", other),
                ))
            }
        }
    }
    Ok(selection)
}
