//! Conversion errors

use mig_core::ValueMigrationError;
use mig_types::{InterfaceStaticType, StaticType};

/// A converter produced a replacement the type model cannot hold
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Interface inside an intersection replaced by a non-interface
    #[error("invalid non-interface replacement in intersection type {intersection}: {original} replaced by {replacement}")]
    NonInterfaceReplacement {
        /// Intersection being converted
        intersection: StaticType,
        /// Member that was converted
        original: InterfaceStaticType,
        /// What the converter returned
        replacement: StaticType,
    },
}

impl From<ConversionError> for ValueMigrationError {
    fn from(err: ConversionError) -> Self {
        Self::ConverterMisuse(err.to_string())
    }
}
