//! RegistryBuilder for constructing an immutable Registry.

use crate::{
    ArgDef, AttrDef, OperationGroup, Registry, RelationDef, RelationKind, ReturnType,
    RootFieldDef, ScalarType, TypeDef,
};
use trellis_core::{RelationId, TypeId};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type {0} declares no identity field")]
    MissingIdentity(String),

    #[error("Identity field {attr} on type {type_name} must be Int, String or ID, not {scalar}")]
    InvalidIdentityType {
        type_name: String,
        attr: String,
        scalar: ScalarType,
    },

    #[error("Unknown attribute: {attr} on type {type_name}")]
    UnknownAttribute { type_name: String, attr: String },

    #[error("Duplicate field {field} on type {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Relation {relation} on type {type_name} has no target")]
    MissingRelationTarget { type_name: String, relation: String },

    #[error("Duplicate root field: {group}.{field}")]
    DuplicateRootField { group: OperationGroup, field: String },

    #[error("Root field {group}.{field} declares no return type")]
    MissingReturnType { group: OperationGroup, field: String },
}

impl RegistryError {
    pub fn unknown_attribute(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn duplicate_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Next relation ID to allocate.
    next_relation_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,

    /// Relations being built.
    relations: HashMap<RelationId, RelationDef>,

    /// Root fields, in declaration order.
    root_fields: Vec<RootFieldDef>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            identity: None,
            derived_identity: false,
            attributes: HashMap::new(),
            duplicate: None,
        }
    }

    /// Add a computed relationship field to an already declared type.
    pub fn add_relation(
        &mut self,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> RelationBuilder<'_> {
        let id = RelationId::new(self.next_relation_id);
        self.next_relation_id += 1;

        RelationBuilder {
            builder: self,
            id,
            owner: owner.into(),
            name: name.into(),
            link: None,
        }
    }

    /// Add a root field to the Query or Mutation group.
    pub fn add_root_field(
        &mut self,
        group: OperationGroup,
        name: impl Into<String>,
    ) -> RootFieldBuilder<'_> {
        RootFieldBuilder {
            builder: self,
            group,
            name: name.into(),
            args: Vec::new(),
            returns: None,
        }
    }

    /// Add a Query root field.
    pub fn add_query(&mut self, name: impl Into<String>) -> RootFieldBuilder<'_> {
        self.add_root_field(OperationGroup::Query, name)
    }

    /// Add a Mutation root field.
    pub fn add_mutation(&mut self, name: impl Into<String>) -> RootFieldBuilder<'_> {
        self.add_root_field(OperationGroup::Mutation, name)
    }

    fn type_id_of(&self, name: &str) -> Result<TypeId, RegistryError> {
        self.type_names
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut root_index = HashMap::new();
        for (i, field) in self.root_fields.iter().enumerate() {
            root_index.insert((field.group, field.name.clone()), i);
        }

        Ok(Registry::new(
            self.types,
            self.type_names,
            self.relations,
            self.root_fields,
            root_index,
        ))
    }
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    identity: Option<String>,
    derived_identity: bool,
    attributes: HashMap<String, AttrDef>,
    duplicate: Option<String>,
}

impl<'a> TypeBuilder<'a> {
    /// Declare the identity field. Identity fields are always required.
    pub fn identity(mut self, name: impl Into<String>, scalar: ScalarType) -> Self {
        let name = name.into();
        self.identity = Some(name.clone());
        self.attr(AttrDef::new(name, scalar).required())
    }

    /// Let the engine derive identities for new records of this type.
    pub fn derived_identity(mut self) -> Self {
        self.derived_identity = true;
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, attr: AttrDef) -> Self {
        if self.attributes.contains_key(&attr.name) && self.duplicate.is_none() {
            self.duplicate = Some(attr.name.clone());
        }
        self.attributes.insert(attr.name.clone(), attr);
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        // Check for duplicate name
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }
        if let Some(field) = self.duplicate {
            return Err(RegistryError::duplicate_field(self.name, field));
        }

        let identity = self
            .identity
            .ok_or_else(|| RegistryError::MissingIdentity(self.name.clone()))?;
        let scalar = self
            .attributes
            .get(&identity)
            .map(|attr| attr.scalar)
            .ok_or_else(|| RegistryError::MissingIdentity(self.name.clone()))?;
        if scalar == ScalarType::Bool {
            return Err(RegistryError::InvalidIdentityType {
                type_name: self.name,
                attr: identity,
                scalar,
            });
        }

        let type_def = TypeDef {
            id: self.id,
            name: self.name.clone(),
            identity,
            derived_identity: self.derived_identity,
            attributes: self.attributes,
            relations: Vec::new(),
        };

        self.builder.type_names.insert(self.name, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}

/// Builder for a relation definition.
pub struct RelationBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: RelationId,
    owner: String,
    name: String,
    link: Option<(RelationKind, String, String)>,
}

impl<'a> RelationBuilder<'a> {
    /// Resolve to every `target` record whose `foreign_key` equals the
    /// owner's identity.
    pub fn has_many(mut self, target: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        self.link = Some((RelationKind::HasMany, target.into(), foreign_key.into()));
        self
    }

    /// Resolve to the `target` record whose identity equals the owner's
    /// `foreign_key`.
    pub fn belongs_to(
        mut self,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        self.link = Some((RelationKind::BelongsTo, target.into(), foreign_key.into()));
        self
    }

    /// Finish building this relation.
    pub fn done(self) -> Result<RelationId, RegistryError> {
        let owner_id = self.builder.type_id_of(&self.owner)?;
        let (kind, target_name, foreign_key) =
            self.link.ok_or_else(|| RegistryError::MissingRelationTarget {
                type_name: self.owner.clone(),
                relation: self.name.clone(),
            })?;
        let target_id = self.builder.type_id_of(&target_name)?;

        // The foreign key lives on the side that stores the reference
        let (fk_type, fk_type_name) = match kind {
            RelationKind::HasMany => (target_id, &target_name),
            RelationKind::BelongsTo => (owner_id, &self.owner),
        };
        if !self.builder.types[&fk_type].has_attr(&foreign_key) {
            return Err(RegistryError::unknown_attribute(fk_type_name, foreign_key));
        }

        let owner_def = &self.builder.types[&owner_id];
        let name_taken = owner_def.has_attr(&self.name)
            || owner_def
                .relations
                .iter()
                .any(|r| self.builder.relations[r].name == self.name);
        if name_taken {
            return Err(RegistryError::duplicate_field(self.owner, self.name));
        }

        let relation = RelationDef {
            id: self.id,
            name: self.name,
            owner: owner_id,
            target: target_id,
            kind,
            foreign_key,
        };

        if let Some(owner_def) = self.builder.types.get_mut(&owner_id) {
            owner_def.relations.push(self.id);
        }
        self.builder.relations.insert(self.id, relation);

        Ok(self.id)
    }
}

/// Builder for a root field.
pub struct RootFieldBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    group: OperationGroup,
    name: String,
    args: Vec<ArgDef>,
    returns: Option<Returns>,
}

enum Returns {
    Record(String),
    List(String),
    Bool,
}

impl<'a> RootFieldBuilder<'a> {
    /// Add an argument.
    pub fn arg(mut self, arg: ArgDef) -> Self {
        self.args.push(arg);
        self
    }

    /// Return a single record of the named type, or null.
    pub fn returns_record(mut self, type_name: impl Into<String>) -> Self {
        self.returns = Some(Returns::Record(type_name.into()));
        self
    }

    /// Return a list of records of the named type.
    pub fn returns_list(mut self, type_name: impl Into<String>) -> Self {
        self.returns = Some(Returns::List(type_name.into()));
        self
    }

    /// Return a success flag.
    pub fn returns_bool(mut self) -> Self {
        self.returns = Some(Returns::Bool);
        self
    }

    /// Finish building this root field.
    pub fn done(self) -> Result<(), RegistryError> {
        let duplicate = self
            .builder
            .root_fields
            .iter()
            .any(|f| f.group == self.group && f.name == self.name);
        if duplicate {
            return Err(RegistryError::DuplicateRootField {
                group: self.group,
                field: self.name,
            });
        }

        let returns = match self.returns {
            Some(Returns::Record(name)) => ReturnType::Record(self.builder.type_id_of(&name)?),
            Some(Returns::List(name)) => ReturnType::List(self.builder.type_id_of(&name)?),
            Some(Returns::Bool) => ReturnType::Bool,
            None => {
                return Err(RegistryError::MissingReturnType {
                    group: self.group,
                    field: self.name,
                })
            }
        };

        self.builder.root_fields.push(RootFieldDef {
            group: self.group,
            name: self.name,
            args: self.args,
            returns,
        });

        Ok(())
    }
}
