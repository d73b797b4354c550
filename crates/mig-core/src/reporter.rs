//! Migration reporting
//!
//! A [`Reporter`] only observes. Nothing it does feeds back into the
//! traversal.

use crate::error::ValueMigrationError;
use crate::migration::{StorageKey, StorageMapKey};
use tracing::{info, warn};

/// Receives per-value notifications
pub trait Reporter {
    /// A migration replaced a leaf
    fn migrated(&mut self, storage_key: &StorageKey, storage_map_key: &StorageMapKey, migration: &str);

    /// A migration failed on a leaf; the leaf was kept
    fn error(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        migration: &str,
        error: &ValueMigrationError,
    );
}

/// Forwards reports to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn migrated(&mut self, storage_key: &StorageKey, storage_map_key: &StorageMapKey, migration: &str) {
        info!(
            address = %storage_key.address,
            domain = %storage_key.domain,
            key = %storage_map_key,
            migration,
            "value migrated"
        );
    }

    fn error(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        migration: &str,
        error: &ValueMigrationError,
    ) {
        warn!(
            address = %storage_key.address,
            domain = %storage_key.domain,
            key = %storage_map_key,
            migration,
            %error,
            "value migration failed"
        );
    }
}

/// Drops every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn migrated(&mut self, _: &StorageKey, _: &StorageMapKey, _: &str) {}

    fn error(&mut self, _: &StorageKey, _: &StorageMapKey, _: &str, _: &ValueMigrationError) {}
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    /// Successful replacement
    Migrated {
        /// Account and domain
        storage_key: StorageKey,
        /// Key within the domain
        storage_map_key: StorageMapKey,
        /// Migration name
        migration: String,
    },
    /// Recoverable failure
    Error {
        /// Account and domain
        storage_key: StorageKey,
        /// Key within the domain
        storage_map_key: StorageMapKey,
        /// Migration name
        migration: String,
        /// Rendered error
        message: String,
    },
}

/// Records every notification in order
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    entries: Vec<ReportEntry>,
}

impl CollectingReporter {
    /// Create empty reporter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, in report order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Successful replacements
    pub fn migrated_entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, ReportEntry::Migrated { .. }))
    }

    /// Recoverable failures
    pub fn error_entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, ReportEntry::Error { .. }))
    }

    /// Names of the migrations reported as successful, in order
    #[must_use]
    pub fn migrated_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ReportEntry::Migrated { migration, .. } => Some(migration.as_str()),
                ReportEntry::Error { .. } => None,
            })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn migrated(&mut self, storage_key: &StorageKey, storage_map_key: &StorageMapKey, migration: &str) {
        self.entries.push(ReportEntry::Migrated {
            storage_key: *storage_key,
            storage_map_key: storage_map_key.clone(),
            migration: migration.to_string(),
        });
    }

    fn error(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        migration: &str,
        error: &ValueMigrationError,
    ) {
        self.entries.push(ReportEntry::Error {
            storage_key: *storage_key,
            storage_map_key: storage_map_key.clone(),
            migration: migration.to_string(),
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_types::Address;
    use mig_values::PathDomain;

    #[test]
    fn collecting_reporter_keeps_order() {
        let key = StorageKey::new(Address::from_u64(1), PathDomain::Storage);
        let map_key = StorageMapKey::from("foo");
        let mut reporter = CollectingReporter::new();

        reporter.migrated(&key, &map_key, "A");
        reporter.error(&key, &map_key, "B", &ValueMigrationError::Failed("boom".into()));
        reporter.migrated(&key, &map_key, "C");

        assert_eq!(reporter.entries().len(), 3);
        assert_eq!(reporter.migrated_names(), vec!["A", "C"]);
        assert_eq!(reporter.error_entries().count(), 1);
        assert!(matches!(
            &reporter.entries()[1],
            ReportEntry::Error { message, .. } if message == "migration failed: boom"
        ));
    }
}
