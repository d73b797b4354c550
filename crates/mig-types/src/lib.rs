//! Static Type Model
//!
//! Shallow, serializable type descriptors embedded in persisted values.
//!
//! # Core Concepts
//!
//! - [`StaticType`]: Closed sum of type constructors (composite, interface,
//!   arrays, dictionary, optional, intersection, reference, capability,
//!   function, primitive)
//! - [`Authorization`]: Access qualifier of reference types
//! - [`PrimitiveStaticType`]: Built-in kinds, including the deprecated
//!   account kinds found in legacy data
//! - [`Address`], [`TypeId`], [`Location`]: Identity of accounts and
//!   nominal types
//! - [`sema`]: Contract with the semantic type checker and conversions in
//!   both directions
//!
//! # Example
//!
//! ```rust
//! use mig_types::{Authorization, PrimitiveStaticType, StaticType};
//!
//! let t = StaticType::optional(StaticType::reference(
//!     Authorization::Unauthorized,
//!     PrimitiveStaticType::Account.into(),
//! ));
//! assert_eq!(t.to_string(), "&Account?");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod authorization;
mod common;
mod error;
mod primitive;
mod static_type;

pub mod sema;

// Re-exports
pub use authorization::{
    Authorization, EntitlementMapAuthorization, EntitlementSetAuthorization, EntitlementSetKind,
    ACCOUNT_ENTITLEMENTS, FULLY_ENTITLED_ACCOUNT_ACCESS,
};
pub use common::{
    type_id_from_qualified_name, Address, AddressError, Location, TypeId, ADDRESS_LENGTH,
};
pub use error::TypeConversionError;
pub use primitive::PrimitiveStaticType;
pub use static_type::{
    CapabilityStaticType, CompositeStaticType, ConstantSizedStaticType, DictionaryStaticType,
    FunctionSignature, FunctionStaticType, InterfaceStaticType, IntersectionStaticType,
    OptionalStaticType, ReferenceStaticType, StaticType, TypeParameter, VariableSizedStaticType,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
