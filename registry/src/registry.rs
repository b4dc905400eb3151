//! The Registry - immutable schema lookup.

use crate::{OperationGroup, RelationDef, RootFieldDef, TypeDef};
use trellis_core::{RelationId, TypeId};
use std::collections::HashMap;

/// The Registry provides runtime lookup of schema definitions.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Entity type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Entity type ID lookup by name.
    type_names: HashMap<String, TypeId>,

    /// Relation definitions by ID.
    relations: HashMap<RelationId, RelationDef>,

    /// Root fields in declaration order.
    root_fields: Vec<RootFieldDef>,
    /// Root field lookup by (group, name).
    root_index: HashMap<(OperationGroup, String), usize>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        relations: HashMap<RelationId, RelationDef>,
        root_fields: Vec<RootFieldDef>,
        root_index: HashMap<(OperationGroup, String), usize>,
    ) -> Self {
        Self {
            types,
            type_names,
            relations,
            root_fields,
            root_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get all type definitions, ordered by ID.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by_key(|t| t.id);
        types.into_iter()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Name of a type, for messages.
    pub fn type_name(&self, id: TypeId) -> &str {
        self.types
            .get(&id)
            .map(|t| t.name.as_str())
            .unwrap_or("unknown")
    }

    // ==================== Relation Lookups ====================

    /// Get a relation definition by ID.
    pub fn get_relation(&self, id: RelationId) -> Option<&RelationDef> {
        self.relations.get(&id)
    }

    /// Get the relations declared on a type, in declaration order.
    pub fn relations_of(&self, type_id: TypeId) -> impl Iterator<Item = &RelationDef> {
        self.types
            .get(&type_id)
            .into_iter()
            .flat_map(|t| t.relations.iter())
            .filter_map(|id| self.relations.get(id))
    }

    /// Find a relation on a type by field name.
    pub fn get_relation_by_name(&self, type_id: TypeId, name: &str) -> Option<&RelationDef> {
        self.relations_of(type_id).find(|r| r.name == name)
    }

    // ==================== Root Field Lookups ====================

    /// Get a root field by group and name.
    pub fn get_root_field(&self, group: OperationGroup, name: &str) -> Option<&RootFieldDef> {
        self.root_index
            .get(&(group, name.to_string()))
            .and_then(|&i| self.root_fields.get(i))
    }

    /// Get all root fields, in declaration order.
    pub fn root_fields(&self) -> impl Iterator<Item = &RootFieldDef> {
        self.root_fields.iter()
    }

    /// Get the root fields of one group, in declaration order.
    pub fn root_fields_in(&self, group: OperationGroup) -> impl Iterator<Item = &RootFieldDef> {
        self.root_fields.iter().filter(move |f| f.group == group)
    }
}
