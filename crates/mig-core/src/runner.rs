//! Account-level migration driver

use crate::address::AddressIterator;
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::migration::{Migration, StorageKey, StorageMapKey};
use crate::migrator::ValueMigrator;
use crate::reporter::Reporter;
use crate::storage::Storage;
use mig_types::Address;
use tracing::{debug, error, info, trace};

/// Totals of a migration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Accounts visited
    pub accounts: usize,
    /// Stored values traversed
    pub values: usize,
    /// Successful leaf replacements
    pub migrated: usize,
    /// Recoverable errors
    pub errors: usize,
}

/// Migrates every stored value of every account the iterator yields
///
/// Mutations accumulate in `storage` and are committed once, after the last
/// account.
pub struct StorageMigration<'s, S: Storage + ?Sized> {
    storage: &'s mut S,
    config: MigrationConfig,
}

impl<'s, S: Storage + ?Sized> StorageMigration<'s, S> {
    /// Create runner with default configuration
    #[must_use]
    pub fn new(storage: &'s mut S) -> Self {
        Self {
            storage,
            config: MigrationConfig::default(),
        }
    }

    /// With configuration
    #[must_use]
    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Run `migrations`, in order, over every account until the zero address
    ///
    /// # Errors
    /// Returns error on a fatal migration error, a structural violation or a
    /// failed commit. Mutations applied before the error are not rolled back.
    pub fn migrate(
        &mut self,
        addresses: &mut dyn AddressIterator,
        reporter: &mut dyn Reporter,
        migrations: &[Box<dyn Migration>],
    ) -> Result<MigrationSummary> {
        info!(
            migrations = migrations.len(),
            domains = ?self.config.domains,
            "starting storage migration"
        );

        let mut summary = MigrationSummary::default();
        let mut migrator = ValueMigrator::new(migrations, reporter);

        loop {
            let address = addresses.next_address();
            if address.is_zero() {
                break;
            }

            if let Err(err) = self.migrate_values_in_account(address, &mut migrator, &mut summary) {
                error!(%address, error = %err, "storage migration aborted");
                return Err(err);
            }
            summary.accounts += 1;
        }

        let stats = migrator.stats();
        summary.migrated = stats.migrated;
        summary.errors = stats.errors;

        if let Err(err) = self.storage.commit(self.config.persist) {
            error!(error = %err, "storage commit failed");
            return Err(err.into());
        }

        info!(
            accounts = summary.accounts,
            values = summary.values,
            migrated = summary.migrated,
            errors = summary.errors,
            "storage migration finished"
        );
        Ok(summary)
    }

    fn migrate_values_in_account(
        &mut self,
        address: Address,
        migrator: &mut ValueMigrator<'_>,
        summary: &mut MigrationSummary,
    ) -> Result<()> {
        debug!(%address, "migrating account");

        for &domain in &self.config.domains {
            let Some(storage_map) = self.storage.storage_map_mut(address, domain) else {
                continue;
            };
            let storage_key = StorageKey::new(address, domain);

            let keys: Vec<String> = storage_map.keys().map(str::to_owned).collect();
            for key in keys {
                let Some(value) = storage_map.get_mut(&key) else {
                    continue;
                };
                trace!(%storage_key, key = %key, "migrating stored value");
                summary.values += 1;

                let storage_map_key = StorageMapKey::new(key);
                if let Some(new_value) =
                    migrator.migrate_nested_value(&storage_key, &storage_map_key, value)?
                {
                    storage_map.write(storage_map_key.0, new_value);
                }
            }
        }

        Ok(())
    }
}
