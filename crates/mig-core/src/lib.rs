//! Storage Value Migration Engine
//!
//! Walks every stored value of every account, applies pluggable leaf
//! migrations and commits the result once.
//!
//! # Core Concepts
//!
//! - [`Migration`]: Named transformation of a single leaf value
//! - [`ValueMigrator`]: Recursive traversal that rewrites containers in place
//! - [`StorageMigration`]: Drives the traversal across accounts, then commits
//! - [`Reporter`]: Observes successes and recoverable errors
//! - [`Storage`]: Seam to the storage backend ([`InMemoryStorage`] built in)
//!
//! # Example
//!
//! ```rust
//! use mig_core::{
//!     AddressSliceIterator, CollectingReporter, InMemoryStorage, Migration, StorageMigration,
//!     StorageSnapshot,
//! };
//! use mig_types::Address;
//! use mig_values::{PathDomain, Value};
//!
//! let mut snapshot = StorageSnapshot::new();
//! snapshot.write(Address::from_u64(1), PathDomain::Storage, "answer", Value::Int(42));
//! let mut storage = InMemoryStorage::from_snapshot(snapshot);
//!
//! let migrations: Vec<Box<dyn Migration>> = Vec::new();
//! let mut reporter = CollectingReporter::new();
//! let summary = StorageMigration::new(&mut storage)
//!     .migrate(
//!         &mut AddressSliceIterator::new([Address::from_u64(1)]),
//!         &mut reporter,
//!         &migrations,
//!     )
//!     .unwrap();
//!
//! assert_eq!(summary.values, 1);
//! assert_eq!(storage.commit_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod address;
mod config;
mod error;
mod migration;
mod migrator;
mod reporter;
mod runner;
mod storage;

// Re-exports
pub use address::{AddressIterator, AddressSliceIterator};
pub use config::MigrationConfig;
pub use error::{MigrationError, Result, StorageError, ValueMigrationError};
pub use migration::{Migration, StorageKey, StorageMapKey};
pub use migrator::{TraversalStats, ValueMigrator};
pub use reporter::{CollectingReporter, NoopReporter, ReportEntry, Reporter, TracingReporter};
pub use runner::{MigrationSummary, StorageMigration};
pub use storage::{InMemoryStorage, Storage, StorageSnapshot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
