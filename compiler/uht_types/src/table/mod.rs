//! Cross-header type table.
//!
//! Filled while headers are parsed in parallel; read by every later phase.
//! Keys are C++ source names (`UWidget`, `FVector`, `EColor`).

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::trace;

use crate::TypeRef;

/// What a registered name refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class { interface: bool, native_interface: bool },
    Struct,
    Enum,
    Delegate { multicast: bool },
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeEntry {
    pub id: TypeRef,
    pub kind: TypeKind,
}

#[derive(Default)]
pub struct TypeTable {
    types: DashMap<String, TypeEntry, FxBuildHasher>,
    /// Enumerator name (`Max` or `EFoo::Max`) to owning enum and value.
    enum_values: RwLock<FxHashMap<String, (TypeRef, i64)>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type; returns the existing entry when the name is taken.
    pub fn register(&self, name: &str, entry: TypeEntry) -> Result<(), TypeEntry> {
        match self.types.entry(name.to_owned()) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                trace!(name, kind = ?entry.kind, "registered type");
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeEntry> {
        self.types.get(name).map(|entry| *entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn register_enum_value(&self, name: impl Into<String>, owner: TypeRef, value: i64) {
        self.enum_values.write().insert(name.into(), (owner, value));
    }

    pub fn enum_value(&self, name: &str) -> Option<(TypeRef, i64)> {
        self.enum_values.read().get(name).copied()
    }

    /// Name a type was registered under.
    pub fn name_of(&self, id: TypeRef) -> Option<String> {
        self.types
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.key().clone())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeTable")
            .field("types", &self.types.len())
            .field("enum_values", &self.enum_values.read().len())
            .finish()
    }
}
