//! Records: the shape of an entity instance.
//!
//! A stored record holds only base fields. Resolvers build fresh records for
//! responses, adding computed relationship fields; they never write those
//! back into the store.

use crate::{Attributes, CoreError, CoreResult, IdentityKey, Value};
use std::fmt;

/// A record of one entity kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Field values.
    pub attributes: Attributes,
}

impl Record {
    /// Create a record from its fields.
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set a field value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.attributes.insert(name.into(), value)
    }

    /// Remove a field.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Check whether a field is present.
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Merge a patch into this record: fields present in the patch overwrite,
    /// all others are kept. Returns the number of fields whose value changed.
    pub fn merge(&mut self, patch: &Attributes) -> usize {
        let mut changed = 0;
        for (name, value) in patch {
            if self.attributes.get(name) != Some(value) {
                self.attributes.insert(name.clone(), value.clone());
                changed += 1;
            }
        }
        changed
    }

    /// Read the identity held in `field`, if it is a valid identity value.
    pub fn identity(&self, field: &str) -> Option<IdentityKey> {
        self.get(field).and_then(IdentityKey::from_value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Consume the record, returning its fields.
    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Convert to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Build a record from a JSON object.
    pub fn from_json(json: &serde_json::Value) -> CoreResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| CoreError::NotAnObject(json.to_string()))?;
        let mut attributes = Attributes::new();
        for (name, value) in object {
            attributes.insert(name.clone(), Value::from_json(value)?);
        }
        Ok(Self { attributes })
    }
}

impl From<Attributes> for Record {
    fn from(attributes: Attributes) -> Self {
        Self { attributes }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
