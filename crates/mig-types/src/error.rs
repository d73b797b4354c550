//! Error types for type conversion

use crate::common::TypeId;

/// Errors converting between static and semantic types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeConversionError {
    /// Semantic access that no reference type can carry
    #[error("unsupported access for reference authorization: {0}")]
    UnsupportedAccess(String),

    /// Composite type ID not declared
    #[error("unknown composite type: {0}")]
    UnknownComposite(TypeId),

    /// Interface not declared
    #[error("unknown interface type: {0}")]
    UnknownInterface(String),

    /// Entitlement not declared
    #[error("unknown entitlement: {0}")]
    UnknownEntitlement(TypeId),

    /// Entitlement map not declared
    #[error("unknown entitlement map: {0}")]
    UnknownEntitlementMap(TypeId),
}
