//! Persisted Value Graph
//!
//! The values a migration walks over, as stored per account.
//!
//! # Core Concepts
//!
//! - [`Value`]: Closed set of leaves and containers
//! - Containers ([`ArrayValue`], [`DictionaryValue`], [`CompositeValue`],
//!   `Value::Some`) are mutated in place and keep their [`StorageId`]
//! - Type-shaped leaves ([`TypeValue`], [`CapabilityValue`], ...) embed
//!   static types
//! - [`AccountStorage`]: One [`StorageMap`] per [`PathDomain`]

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod container;
mod error;
mod path;
mod storage_map;
mod value;

// Re-exports
pub use container::{ArrayValue, CompositeValue, DictionaryValue, StorageId};
pub use error::ValueError;
pub use path::{PathDomain, PathValue, UnknownPathDomain};
pub use storage_map::{AccountStorage, StorageMap};
pub use value::{
    AccountCapabilityControllerValue, CapabilityValue, PathCapabilityValue, PathLinkValue,
    StorageCapabilityControllerValue, TypeValue, Value,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
