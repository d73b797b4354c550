//! Storage seam
//!
//! The engine needs mutable access to one storage map at a time and a single
//! commit at the end. [`InMemoryStorage`] implements that over a
//! [`StorageSnapshot`], with a working copy that only becomes the persisted
//! state on `commit(true)`.

use crate::error::StorageError;
use mig_types::Address;
use mig_values::{AccountStorage, PathDomain, StorageMap, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Addressable, committable account storage
pub trait Storage {
    /// Storage map of `(address, domain)`, if it exists
    fn storage_map_mut(&mut self, address: Address, domain: PathDomain) -> Option<&mut StorageMap>;

    /// Finalize all mutations made so far
    ///
    /// # Errors
    /// Returns error if the backend rejects the commit
    fn commit(&mut self, persist: bool) -> Result<(), StorageError>;
}

/// Serializable contents of every account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSnapshot {
    /// Accounts by address
    pub accounts: BTreeMap<Address, AccountStorage>,
}

impl StorageSnapshot {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store value
    pub fn write(&mut self, address: Address, domain: PathDomain, key: impl Into<String>, value: Value) {
        self.accounts.entry(address).or_default().write(domain, key, value);
    }

    /// Stored value
    #[must_use]
    pub fn read(&self, address: Address, domain: PathDomain, key: &str) -> Option<&Value> {
        self.accounts.get(&address).and_then(|a| a.read(domain, key))
    }

    /// Account addresses in ascending order
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.accounts.keys().copied()
    }
}

/// Storage held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    working: StorageSnapshot,
    persisted: StorageSnapshot,
    commit_count: usize,
    commit_failure: Option<String>,
}

impl InMemoryStorage {
    /// Create empty storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage whose working and persisted state is `snapshot`
    #[must_use]
    pub fn from_snapshot(snapshot: StorageSnapshot) -> Self {
        Self {
            working: snapshot.clone(),
            persisted: snapshot,
            ..Self::default()
        }
    }

    /// Make every commit fail with `message`
    #[must_use]
    pub fn with_commit_failure(mut self, message: impl Into<String>) -> Self {
        self.commit_failure = Some(message.into());
        self
    }

    /// Store value in the working state
    pub fn write(&mut self, address: Address, domain: PathDomain, key: impl Into<String>, value: Value) {
        self.working.write(address, domain, key, value);
    }

    /// Value in the working state
    #[must_use]
    pub fn read(&self, address: Address, domain: PathDomain, key: &str) -> Option<&Value> {
        self.working.read(address, domain, key)
    }

    /// Working state
    #[inline]
    #[must_use]
    pub fn working(&self) -> &StorageSnapshot {
        &self.working
    }

    /// Last persisted state
    #[inline]
    #[must_use]
    pub fn persisted(&self) -> &StorageSnapshot {
        &self.persisted
    }

    /// Consume into the last persisted state
    #[must_use]
    pub fn into_persisted(self) -> StorageSnapshot {
        self.persisted
    }

    /// Accounts present in the working state
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.working.addresses().collect()
    }

    /// Number of successful commits
    #[inline]
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }
}

impl Storage for InMemoryStorage {
    fn storage_map_mut(&mut self, address: Address, domain: PathDomain) -> Option<&mut StorageMap> {
        self.working
            .accounts
            .get_mut(&address)
            .and_then(|account| account.storage_map_mut(domain))
    }

    fn commit(&mut self, persist: bool) -> Result<(), StorageError> {
        if let Some(message) = &self.commit_failure {
            return Err(StorageError::CommitFailed(message.clone()));
        }
        if persist {
            self.persisted = self.working.clone();
        }
        self.commit_count += 1;
        debug!(persist, commits = self.commit_count, "storage committed");
        Ok(())
    }
}
