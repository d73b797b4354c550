//! Static Type Migration
//!
//! A [`Migration`](mig_core::Migration) that rewrites the static types
//! embedded in stored values into the current type representation.
//!
//! # Core Concepts
//!
//! - `AuthAccount` becomes a fully entitled `&Account` reference,
//!   `PublicAccount` an unauthorized one ([`AUTH_ACCOUNT_REFERENCE_TYPE`],
//!   [`UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE`])
//! - Legacy account member kinds map to their `Account.*` counterparts
//! - Composite and interface types go through caller-supplied converters
//! - Wrapper types are rebuilt only around changed parts; intersections with
//!   two or more members are always rebuilt
//!
//! # Example
//!
//! ```rust
//! use mig_statictypes::{StaticTypeMigration, UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE};
//! use mig_types::{PrimitiveStaticType, StaticType};
//!
//! let migration = StaticTypeMigration::new();
//! let converted = migration
//!     .convert(&StaticType::optional(PrimitiveStaticType::PublicAccount.into()))
//!     .unwrap();
//! assert_eq!(
//!     converted,
//!     Some(StaticType::optional(UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE.clone()))
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod canonical;
mod error;
mod migration;

// Re-exports
pub use canonical::{
    convert_primitive, is_account_reference_type, AUTH_ACCOUNT_REFERENCE_TYPE,
    UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE,
};
pub use error::ConversionError;
pub use migration::{CompositeTypeConverter, InterfaceTypeConverter, StaticTypeMigration};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
