//! Identity index for point lookups.

use trellis_core::{IdentityKey, Record};
use std::collections::HashMap;

/// Identity index: IdentityKey -> positions in the collection.
///
/// Positions are kept in insertion order so the first entry is always the
/// record a lookup reports.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    index: HashMap<IdentityKey, Vec<usize>>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a whole collection.
    pub fn build(records: &[Record], identity_field: &str) -> Self {
        let mut index = Self::new();
        for (position, record) in records.iter().enumerate() {
            if let Some(key) = record.identity(identity_field) {
                index.insert(key, position);
            }
        }
        index
    }

    pub fn insert(&mut self, key: IdentityKey, position: usize) {
        self.index.entry(key).or_default().push(position);
    }

    /// First position holding this identity.
    pub fn first(&self, key: &IdentityKey) -> Option<usize> {
        self.index.get(key).and_then(|positions| positions.first().copied())
    }

    /// All positions holding this identity.
    pub fn get(&self, key: &IdentityKey) -> &[usize] {
        self.index.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over every indexed identity.
    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.index.keys()
    }
}
