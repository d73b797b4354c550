//! Error types for the migration engine
//!
//! Two levels:
//! - [`ValueMigrationError`]: returned by a single [`Migration`](crate::Migration)
//!   for a single leaf. Most are recoverable; see [`ValueMigrationError::is_fatal`].
//! - [`MigrationError`]: aborts a whole run.

use crate::migration::{StorageKey, StorageMapKey};
use mig_values::ValueError;

/// Error migrating one leaf value
#[derive(Debug, thiserror::Error)]
pub enum ValueMigrationError {
    /// The migration could not handle this value
    #[error("migration failed: {0}")]
    Failed(String),

    /// Error raised by a collaborator of the migration
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// A caller-supplied converter produced an illegal replacement
    #[error("converter misuse: {0}")]
    ConverterMisuse(String),

    /// Controller borrow type did not stay a reference type
    #[error("invalid borrow type: {0}")]
    InvalidBorrowType(String),

    /// A case the closed data model rules out
    #[error("unreachable: {0}")]
    Unreachable(String),
}

impl ValueMigrationError {
    /// Check if the error must abort the run
    ///
    /// Recoverable errors are reported and the original leaf is kept.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConverterMisuse(_) | Self::InvalidBorrowType(_) | Self::Unreachable(_)
        )
    }
}

/// Storage backend error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Commit was rejected
    #[error("commit failed: {0}")]
    CommitFailed(String),
}

/// Error aborting a migration run
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Container structure changed under the traversal
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// A migration returned a fatal error
    #[error("fatal error in {migration} at {storage_key}/{storage_map_key}: {source}")]
    Fatal {
        /// Account and domain
        storage_key: StorageKey,
        /// Key within the domain
        storage_map_key: StorageMapKey,
        /// Migration name
        migration: String,
        /// Underlying error
        source: ValueMigrationError,
    },

    /// Final commit failed
    #[error("commit failed: {0}")]
    Commit(#[from] StorageError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ValueError> for MigrationError {
    fn from(err: ValueError) -> Self {
        Self::Invariant(err.to_string())
    }
}

/// Result alias for migration runs
pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(!ValueMigrationError::Failed("x".into()).is_fatal());
        assert!(!ValueMigrationError::Other("x".into()).is_fatal());
        assert!(ValueMigrationError::ConverterMisuse("x".into()).is_fatal());
        assert!(ValueMigrationError::InvalidBorrowType("x".into()).is_fatal());
        assert!(ValueMigrationError::Unreachable("x".into()).is_fatal());
    }

    #[test]
    fn value_error_is_an_invariant_violation() {
        let err: MigrationError = ValueError::IndexOutOfBounds { index: 2, count: 1 }.into();
        assert!(matches!(err, MigrationError::Invariant(_)));
    }
}
