//! Migration run configuration
//!
//! ```toml
//! persist = true
//! domains = ["storage", "public"]
//! log_level = "debug"
//! ```

use crate::error::{MigrationError, Result};
use mig_values::PathDomain;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of a migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Passed to the final storage commit
    pub persist: bool,
    /// Domains enumerated per account, in order
    pub domains: Vec<PathDomain>,
    /// Default log filter of the binary
    pub log_level: String,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With persist flag
    #[inline]
    #[must_use]
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// With domains
    #[must_use]
    pub fn with_domains(mut self, domains: impl IntoIterator<Item = PathDomain>) -> Self {
        self.domains = domains.into_iter().collect();
        self
    }

    /// With log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`MigrationError::Config`] on malformed TOML
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MigrationError::Config(e.to_string()))
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`MigrationError::Config`] if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MigrationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            persist: true,
            domains: PathDomain::ALL.to_vec(),
            log_level: "info".to_string(),
        }
    }
}
