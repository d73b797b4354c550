//! storage-migrate driver
//!
//! Loads a JSON [`StorageSnapshot`], runs [`StaticTypeMigration`] over the
//! selected accounts and optionally writes the persisted result back out.
//! The binary is a thin argument parser around [`migrate`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{Context, Result};
use mig_core::{
    AddressSliceIterator, CollectingReporter, InMemoryStorage, Migration, MigrationConfig,
    MigrationSummary, ReportEntry, Reporter, StorageKey, StorageMapKey, StorageMigration,
    StorageSnapshot, TracingReporter, ValueMigrationError,
};
use mig_statictypes::StaticTypeMigration;
use mig_types::Address;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Inputs of one `migrate` invocation
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Snapshot to migrate
    pub input: PathBuf,
    /// Where to write the persisted snapshot, if anywhere
    pub output: Option<PathBuf>,
    /// Accounts to migrate; every account in the snapshot when empty
    pub addresses: Vec<Address>,
    /// Run configuration
    pub config: MigrationConfig,
}

impl MigrateOptions {
    /// Create options for `input` with default configuration
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            addresses: Vec::new(),
            config: MigrationConfig::default(),
        }
    }

    /// With output path
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// With explicit account list
    #[must_use]
    pub fn with_addresses(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.addresses = addresses.into_iter().collect();
        self
    }

    /// With configuration
    #[must_use]
    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct MigrateOutcome {
    /// Run totals
    pub summary: MigrationSummary,
    /// Every report, in order
    pub entries: Vec<ReportEntry>,
    /// Persisted state after the commit
    pub snapshot: StorageSnapshot,
}

impl MigrateOutcome {
    /// Summary and reports as JSON
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let reports: Vec<serde_json::Value> = self
            .entries
            .iter()
            .map(|entry| match entry {
                ReportEntry::Migrated {
                    storage_key,
                    storage_map_key,
                    migration,
                } => serde_json::json!({
                    "kind": "migrated",
                    "storage_key": storage_key.to_string(),
                    "storage_map_key": storage_map_key.as_str(),
                    "migration": migration,
                }),
                ReportEntry::Error {
                    storage_key,
                    storage_map_key,
                    migration,
                    message,
                } => serde_json::json!({
                    "kind": "error",
                    "storage_key": storage_key.to_string(),
                    "storage_map_key": storage_map_key.as_str(),
                    "migration": migration,
                    "message": message,
                }),
            })
            .collect();

        serde_json::json!({
            "accounts": self.summary.accounts,
            "values": self.summary.values,
            "migrated": self.summary.migrated,
            "errors": self.summary.errors,
            "reports": reports,
        })
    }
}

/// Records reports and mirrors them to the log
#[derive(Debug, Default)]
struct CliReporter {
    collecting: CollectingReporter,
    tracing: TracingReporter,
}

impl Reporter for CliReporter {
    fn migrated(&mut self, storage_key: &StorageKey, storage_map_key: &StorageMapKey, migration: &str) {
        self.tracing.migrated(storage_key, storage_map_key, migration);
        self.collecting.migrated(storage_key, storage_map_key, migration);
    }

    fn error(
        &mut self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        migration: &str,
        error: &ValueMigrationError,
    ) {
        self.tracing.error(storage_key, storage_map_key, migration, error);
        self.collecting.error(storage_key, storage_map_key, migration, error);
    }
}

/// Configuration from `path`, or the default when absent
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> Result<MigrationConfig> {
    match path {
        Some(path) => MigrationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(MigrationConfig::default()),
    }
}

/// Read a JSON snapshot
///
/// # Errors
/// Returns error if the file cannot be read or is not a valid snapshot
pub fn read_snapshot(path: &Path) -> Result<StorageSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// Write a snapshot as pretty-printed JSON
///
/// # Errors
/// Returns error if serialization or the write fails
pub fn write_snapshot(path: &Path, snapshot: &StorageSnapshot) -> Result<()> {
    let text = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    fs::write(path, text).with_context(|| format!("writing snapshot {}", path.display()))
}

/// Run the static type migration described by `options`
///
/// # Errors
/// Returns error if the snapshot cannot be loaded or written, or if the
/// migration aborts
pub fn migrate(options: &MigrateOptions) -> Result<MigrateOutcome> {
    let snapshot = read_snapshot(&options.input)?;

    let addresses: Vec<Address> = if options.addresses.is_empty() {
        snapshot.addresses().collect()
    } else {
        options.addresses.clone()
    };
    // the zero address ends iteration early
    let addresses: Vec<Address> = addresses
        .into_iter()
        .filter(|address| {
            if address.is_zero() {
                warn!("skipping reserved zero address");
            }
            !address.is_zero()
        })
        .collect();

    info!(
        input = %options.input.display(),
        accounts = addresses.len(),
        persist = options.config.persist,
        "migrating snapshot"
    );

    let mut storage = InMemoryStorage::from_snapshot(snapshot);
    let migrations: Vec<Box<dyn Migration>> = vec![Box::new(StaticTypeMigration::new())];
    let mut reporter = CliReporter::default();

    let summary = StorageMigration::new(&mut storage)
        .with_config(options.config.clone())
        .migrate(
            &mut AddressSliceIterator::new(addresses),
            &mut reporter,
            &migrations,
        )
        .context("storage migration failed")?;

    let snapshot = storage.into_persisted();
    if let Some(output) = &options.output {
        write_snapshot(output, &snapshot)?;
        info!(output = %output.display(), "snapshot written");
    }

    Ok(MigrateOutcome {
        summary,
        entries: reporter.collecting.entries().to_vec(),
        snapshot,
    })
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
