//! Pluggable leaf migrations and their storage context

use crate::error::ValueMigrationError;
use mig_types::Address;
use mig_values::{PathDomain, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Account and domain of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey {
    /// Owning account
    pub address: Address,
    /// Storage domain
    pub domain: PathDomain,
}

impl StorageKey {
    /// Create storage key
    #[inline]
    #[must_use]
    pub const fn new(address: Address, domain: PathDomain) -> Self {
        Self { address, domain }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.domain)
    }
}

/// Key of a value within one domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageMapKey(pub String);

impl StorageMapKey {
    /// Create key
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageMapKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageMapKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Named transformation of a leaf value
///
/// Migrations only ever see leaves; containers are walked by the
/// [`ValueMigrator`](crate::ValueMigrator). Returning `Ok(None)` means the
/// leaf is left as is.
pub trait Migration {
    /// Name used in reports
    fn name(&self) -> &str;

    /// Migrate one leaf
    ///
    /// # Errors
    /// Returns a recoverable error to skip this leaf, or a fatal one
    /// (see [`ValueMigrationError::is_fatal`]) to abort the run
    fn migrate(
        &self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        value: &Value,
    ) -> Result<Option<Value>, ValueMigrationError>;
}

impl<M: Migration + ?Sized> Migration for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn migrate(
        &self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        value: &Value,
    ) -> Result<Option<Value>, ValueMigrationError> {
        (**self).migrate(storage_key, storage_map_key, value)
    }
}
