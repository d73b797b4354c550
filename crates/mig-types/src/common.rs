//! Account addresses, type identifiers and locations
//!
//! Provides [`Address`], the 8-byte account address used to scope storage,
//! [`TypeId`], the globally unique identifier of a nominal type, and
//! [`Location`], the origin of a nominal type declaration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Length of an account address in bytes
pub const ADDRESS_LENGTH: usize = 8;

/// An 8-byte account address
///
/// The all-zero address is reserved: address iterators return it to signal
/// exhaustion, so it never identifies a migrated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The reserved zero address
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// Create address from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create address from a big-endian integer
    #[inline]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Check if this is the reserved zero address
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Hex form without the `0x` prefix, zero-padded to 16 characters
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Error parsing an [`Address`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Too many hex digits for an 8-byte address
    #[error("address too long: {0} hex digits (max 16)")]
    TooLong(usize),

    /// Not valid hexadecimal
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),
}

impl FromStr for Address {
    type Err = AddressError;

    /// Parse `0x`-prefixed or bare hex; short forms are left-padded with zeros
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(AddressError::TooLong(digits.len()));
        }
        let padded = format!("{digits:0>16}");
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Globally unique identifier of a nominal type, entitlement or entitlement map
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Create type ID
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Where a nominal type was declared
///
/// Type IDs are derived from the location prefix and the qualified identifier:
/// - `A.<address hex>.<qualified identifier>` for contracts deployed to an account
/// - `S.<name>.<qualified identifier>` for scripts and test programs
/// - `I.<name>.<qualified identifier>` for built-in identifier locations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Contract deployed to an account
    Address {
        /// Account holding the contract
        address: Address,
        /// Contract name
        name: String,
    },

    /// Named in-memory program
    String {
        /// Program name
        name: String,
    },

    /// Built-in identifier location
    Identifier {
        /// Identifier
        name: String,
    },
}

impl Location {
    /// Short prefix used in type IDs
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Address { .. } => "A",
            Self::String { .. } => "S",
            Self::Identifier { .. } => "I",
        }
    }

    /// Type ID of `qualified_identifier` declared at this location
    #[must_use]
    pub fn type_id(&self, qualified_identifier: &str) -> TypeId {
        match self {
            Self::Address { address, .. } => {
                TypeId::new(format!("A.{}.{}", address.to_hex(), qualified_identifier))
            }
            Self::String { name } => TypeId::new(format!("S.{name}.{qualified_identifier}")),
            Self::Identifier { name } => TypeId::new(format!("I.{name}.{qualified_identifier}")),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address { address, name } => write!(f, "A.{}.{}", address.to_hex(), name),
            Self::String { name } => write!(f, "S.{name}"),
            Self::Identifier { name } => write!(f, "I.{name}"),
        }
    }
}

/// Type ID for a possibly location-less nominal type
///
/// Built-in types have no location; their type ID is the bare identifier.
#[must_use]
pub fn type_id_from_qualified_name(location: Option<&Location>, qualified_identifier: &str) -> TypeId {
    match location {
        Some(location) => location.type_id(qualified_identifier),
        None => TypeId::new(qualified_identifier),
    }
}
