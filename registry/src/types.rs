//! Schema definition types.

use trellis_core::{RelationId, TypeId, Value};
use std::collections::HashMap;
use std::fmt;

/// Scalar field types a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    String,
    Bool,
    /// Opaque identifier. Stored as a string; integer input is accepted and
    /// converted.
    Id,
}

impl ScalarType {
    /// Schema name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Int => "Int",
            ScalarType::String => "String",
            ScalarType::Bool => "Boolean",
            ScalarType::Id => "ID",
        }
    }

    /// Check if a value is acceptable for this type. Null is always
    /// acceptable here; requiredness is checked separately.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ScalarType::Int, Value::Int(_))
                | (ScalarType::String, Value::String(_))
                | (ScalarType::Bool, Value::Bool(_))
                | (ScalarType::Id, Value::String(_))
                | (ScalarType::Id, Value::Int(_))
        )
    }

    /// Bring an accepted value into its stored form.
    pub fn coerce(&self, value: Value) -> Value {
        match (self, value) {
            (ScalarType::Id, Value::Int(i)) => Value::String(i.to_string()),
            (_, value) => value,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute definition within a type.
#[derive(Debug, Clone)]
pub struct AttrDef {
    /// Attribute name.
    pub name: String,
    /// Declared scalar type.
    pub scalar: ScalarType,
    /// Whether this attribute must be present and non-null.
    pub required: bool,
}

impl AttrDef {
    pub fn new(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Entity type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Name of the identity field. Always present in `attributes`.
    pub identity: String,
    /// Whether the engine derives identities for new records of this type.
    pub derived_identity: bool,
    /// Stored attribute definitions (identity included).
    pub attributes: HashMap<String, AttrDef>,
    /// Relations declared on this type, in declaration order.
    pub relations: Vec<RelationId>,
}

impl TypeDef {
    /// Get an attribute definition by name.
    pub fn get_attr(&self, name: &str) -> Option<&AttrDef> {
        self.attributes.get(name)
    }

    /// Check if this type has an attribute.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Definition of the identity field.
    pub fn identity_attr(&self) -> Option<&AttrDef> {
        self.attributes.get(&self.identity)
    }
}

/// Direction of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Owner is the parent: collect every target record whose foreign key
    /// equals the owner's identity.
    HasMany,
    /// Owner is the child: find the target record whose identity equals the
    /// owner's foreign key.
    BelongsTo,
}

/// A computed relationship field.
#[derive(Debug, Clone)]
pub struct RelationDef {
    /// Unique identifier.
    pub id: RelationId,
    /// Field name on the owner type.
    pub name: String,
    /// Type the field is declared on.
    pub owner: TypeId,
    /// Type the field resolves to.
    pub target: TypeId,
    /// Join direction.
    pub kind: RelationKind,
    /// Foreign-key field. Lives on the target for HasMany, on the owner for
    /// BelongsTo.
    pub foreign_key: String,
}

impl RelationDef {
    /// Returns true if the field resolves to a list.
    pub fn is_many(&self) -> bool {
        self.kind == RelationKind::HasMany
    }
}

/// Root operation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationGroup {
    Query,
    Mutation,
}

impl fmt::Display for OperationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationGroup::Query => f.write_str("Query"),
            OperationGroup::Mutation => f.write_str("Mutation"),
        }
    }
}

/// Declared argument of a root field.
#[derive(Debug, Clone)]
pub struct ArgDef {
    /// Argument name.
    pub name: String,
    /// Declared scalar type.
    pub scalar: ScalarType,
    /// Whether the argument must be supplied and non-null.
    pub required: bool,
}

impl ArgDef {
    pub fn new(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// What a root field returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// A single record of the type, or null.
    Record(TypeId),
    /// A list of records of the type.
    List(TypeId),
    /// A success flag.
    Bool,
}

impl ReturnType {
    /// The entity type returned, if any.
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            ReturnType::Record(id) | ReturnType::List(id) => Some(*id),
            ReturnType::Bool => None,
        }
    }
}

/// A root field of the Query or Mutation group.
#[derive(Debug, Clone)]
pub struct RootFieldDef {
    /// Group the field belongs to.
    pub group: OperationGroup,
    /// Field name.
    pub name: String,
    /// Declared arguments, in declaration order.
    pub args: Vec<ArgDef>,
    /// Return type.
    pub returns: ReturnType,
}

impl RootFieldDef {
    /// Get an argument definition by name.
    pub fn get_arg(&self, name: &str) -> Option<&ArgDef> {
        self.args.iter().find(|a| a.name == name)
    }
}
