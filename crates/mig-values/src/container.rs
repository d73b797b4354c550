//! Container values
//!
//! Containers are never replaced during a migration, only their contents.
//! Each container carries a [`StorageId`] so callers can check that a pass
//! kept the container's identity. Equality and hashing ignore the ID.

use crate::error::ValueError;
use crate::value::Value;
use indexmap::IndexMap;
use mig_types::{Location, StaticType, TypeId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a container in storage
///
/// Clones share the ID; deserialized containers get a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageId(u64);

impl StorageId {
    /// Allocate a new, process-unique ID
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_STORAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Ordered sequence of values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(skip, default = "StorageId::fresh")]
    id: StorageId,
    /// Array type (`[T]` or `[T; n]`)
    pub static_type: StaticType,
    elements: Vec<Value>,
}

impl ArrayValue {
    /// Create array
    #[must_use]
    pub fn new(static_type: StaticType, elements: Vec<Value>) -> Self {
        Self {
            id: StorageId::fresh(),
            static_type,
            elements,
        }
    }

    /// Storage identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> StorageId {
        self.id
    }

    /// Number of elements
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// Element at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Mutable element at `index`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.elements.get_mut(index)
    }

    /// Replace element at `index`, returning the previous one
    ///
    /// # Errors
    /// Returns [`ValueError::IndexOutOfBounds`] if `index >= count()`
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, ValueError> {
        let count = self.elements.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfBounds { index, count })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Iterate elements in order
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter()
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.static_type == other.static_type && self.elements == other.elements
    }
}

impl Eq for ArrayValue {}

impl Hash for ArrayValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.static_type.hash(state);
        self.elements.hash(state);
    }
}

/// Key-value mapping keyed by value
///
/// Entries are keyed by value hash, so a changed key must be removed and
/// re-inserted rather than updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryValue {
    #[serde(skip, default = "StorageId::fresh")]
    id: StorageId,
    /// Dictionary type (`{K: V}`)
    pub static_type: StaticType,
    #[serde(with = "entry_list")]
    entries: IndexMap<Value, Value>,
}

impl DictionaryValue {
    /// Create dictionary; later duplicates of a key win
    #[must_use]
    pub fn new(static_type: StaticType, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self {
            id: StorageId::fresh(),
            static_type,
            entries: entries.into_iter().collect(),
        }
    }

    /// Storage identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> StorageId {
        self.id
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate keys
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.keys()
    }

    /// Iterate entries
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }

    /// Value under `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable value under `key`
    #[inline]
    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Check if `key` is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, returning its value
    pub fn remove_key(&mut self, key: &Value) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Insert or remove an entry
    ///
    /// `Some(v)` stores `v` under `key`; `Nil` removes `key`. Returns the
    /// previous value.
    ///
    /// # Errors
    /// Returns [`ValueError::NotOptional`] for any other value
    pub fn set_key(&mut self, key: Value, value: Value) -> Result<Option<Value>, ValueError> {
        match value {
            Value::Some(inner) => Ok(self.entries.insert(key, *inner)),
            Value::Nil => Ok(self.entries.shift_remove(&key)),
            other => Err(ValueError::NotOptional(other.kind())),
        }
    }
}

impl PartialEq for DictionaryValue {
    fn eq(&self, other: &Self) -> bool {
        self.static_type == other.static_type && self.entries == other.entries
    }
}

impl Eq for DictionaryValue {}

impl Hash for DictionaryValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // entry order is not significant
        self.static_type.hash(state);
        self.entries.len().hash(state);
    }
}

/// Instance of a user-defined composite type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeValue {
    #[serde(skip, default = "StorageId::fresh")]
    id: StorageId,
    /// Declaring location, `None` for built-ins
    pub location: Option<Location>,
    /// Qualified identifier of the composite type
    pub qualified_identifier: String,
    fields: IndexMap<String, Value>,
}

impl CompositeValue {
    /// Create composite
    #[must_use]
    pub fn new(
        location: Option<Location>,
        qualified_identifier: impl Into<String>,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self {
            id: StorageId::fresh(),
            location,
            qualified_identifier: qualified_identifier.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Storage identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> StorageId {
        self.id
    }

    /// Type ID of the composite type
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        mig_types::type_id_from_qualified_name(self.location.as_ref(), &self.qualified_identifier)
    }

    /// Static type of this value
    #[must_use]
    pub fn static_type(&self) -> StaticType {
        StaticType::composite(self.location.clone(), self.qualified_identifier.clone())
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field value
    #[inline]
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Mutable field value
    #[inline]
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Set field, returning the previous value
    pub fn set_member(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }
}

impl PartialEq for CompositeValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id() && self.fields == other.fields
    }
}

impl Eq for CompositeValue {}

impl Hash for CompositeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
        self.fields.len().hash(state);
    }
}

/// Dictionary entries as a list of pairs, since keys are not strings
mod entry_list {
    use crate::value::Value;
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        entries: &IndexMap<Value, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(entries.iter())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<Value, Value>, D::Error> {
        let pairs = Vec::<(Value, Value)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
