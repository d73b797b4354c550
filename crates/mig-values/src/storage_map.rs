//! Per-account storage maps
//!
//! An account stores values under `(domain, key)`. [`AccountStorage`] groups
//! one [`StorageMap`] per [`PathDomain`]; maps are created on first write.

use crate::path::PathDomain;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values of one domain, keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageMap {
    entries: IndexMap<String, Value>,
}

impl StorageMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stored value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable stored value
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Store value, returning the previous one
    pub fn write(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }
}

impl FromIterator<(String, Value)> for StorageMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// All storage maps of one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountStorage {
    domains: BTreeMap<PathDomain, StorageMap>,
}

impl AccountStorage {
    /// Create empty account storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage map of `domain`, if any value was ever written there
    #[inline]
    #[must_use]
    pub fn storage_map(&self, domain: PathDomain) -> Option<&StorageMap> {
        self.domains.get(&domain)
    }

    /// Mutable storage map of `domain`
    #[inline]
    pub fn storage_map_mut(&mut self, domain: PathDomain) -> Option<&mut StorageMap> {
        self.domains.get_mut(&domain)
    }

    /// Store value under `(domain, key)`
    pub fn write(&mut self, domain: PathDomain, key: impl Into<String>, value: Value) -> Option<Value> {
        self.domains.entry(domain).or_default().write(key, value)
    }

    /// Value under `(domain, key)`
    #[must_use]
    pub fn read(&self, domain: PathDomain, key: &str) -> Option<&Value> {
        self.domains.get(&domain).and_then(|map| map.get(key))
    }

    /// Domains with a storage map
    pub fn domains(&self) -> impl Iterator<Item = PathDomain> + '_ {
        self.domains.keys().copied()
    }

    /// Total number of stored values
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.domains.values().map(StorageMap::len).sum()
    }
}
