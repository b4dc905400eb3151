//! Identity types for Trellis.
//!
//! Type and relation identifiers are registry-assigned and opaque.
//! Record identities are whatever the declared identity field holds,
//! restricted to the two scalar kinds that can be compared for equality
//! and hashed: integers and strings.

use crate::Value;
use std::fmt;

/// Identifier for an entity type in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifier for a relation in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(pub u32);

impl RelationId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// The value of a record's identity field, in hashable form.
///
/// Matching is strict: `Int(1)` and `String("1")` are different identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityKey {
    Int(i64),
    String(String),
}

impl IdentityKey {
    /// Build a key from a value. Only Int and String values can be identities.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(IdentityKey::Int(*i)),
            Value::String(s) => Some(IdentityKey::String(s.clone())),
            _ => None,
        }
    }

    /// Convert back into a value.
    pub fn to_value(&self) -> Value {
        match self {
            IdentityKey::Int(i) => Value::Int(*i),
            IdentityKey::String(s) => Value::String(s.clone()),
        }
    }

    /// Numeric reading of this key, if it has one.
    ///
    /// String identities made of digits ("42") count as numeric so that
    /// derived identities can continue a seeded sequence.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            IdentityKey::Int(i) => Some(*i),
            IdentityKey::String(s) => s.parse().ok(),
        }
    }

    /// Check whether a value holds this identity.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (IdentityKey::Int(a), Value::Int(b)) => a == b,
            (IdentityKey::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Int(i) => write!(f, "{}", i),
            IdentityKey::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for IdentityKey {
    fn from(i: i64) -> Self {
        IdentityKey::Int(i)
    }
}

impl From<&str> for IdentityKey {
    fn from(s: &str) -> Self {
        IdentityKey::String(s.to_string())
    }
}

impl From<String> for IdentityKey {
    fn from(s: String) -> Self {
        IdentityKey::String(s)
    }
}
