//! Stored values
//!
//! [`Value`] is the closed set of value shapes the migration traversal
//! distinguishes: four container kinds it descends into and leaves it hands
//! to migrations. Type-shaped leaves embed a [`StaticType`], which is what
//! type-rewriting migrations act on.

use crate::container::{ArrayValue, CompositeValue, DictionaryValue};
use crate::path::PathValue;
use mig_types::{Address, ReferenceStaticType, StaticType};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Run-time type value (`Type<T>()`); `None` for an unknown type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeValue {
    /// Embedded type
    pub static_type: Option<StaticType>,
}

/// ID-based capability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityValue {
    /// Capability ID
    pub id: u64,
    /// Issuing account
    pub address: Address,
    /// Borrow type
    pub borrow_type: StaticType,
}

/// Legacy path-based capability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathCapabilityValue {
    /// Issuing account
    pub address: Address,
    /// Target path
    pub path: PathValue,
    /// Borrow type; absent in old data
    pub borrow_type: Option<StaticType>,
}

/// Legacy link from one path to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathLinkValue {
    /// Link target
    pub target_path: PathValue,
    /// Borrow type
    pub borrow_type: StaticType,
}

/// Controller of an account capability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountCapabilityControllerValue {
    /// Borrow type; always a reference
    pub borrow_type: ReferenceStaticType,
    /// Controlled capability
    pub capability_id: u64,
}

/// Controller of a storage capability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageCapabilityControllerValue {
    /// Borrow type; always a reference
    pub borrow_type: ReferenceStaticType,
    /// Controlled capability
    pub capability_id: u64,
    /// Storage path the capability targets
    pub target_path: PathValue,
}

/// Persisted value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Present optional
    Some(Box<Value>),
    /// Absent optional
    Nil,
    /// Array container
    Array(ArrayValue),
    /// Dictionary container
    Dictionary(DictionaryValue),
    /// Composite container
    Composite(CompositeValue),

    /// `Bool`
    Bool(bool),
    /// Integer
    Int(i64),
    /// `String`
    String(String),
    /// `Address`
    Address(Address),
    /// Path
    Path(PathValue),
    /// Run-time type
    Type(TypeValue),
    /// ID-based capability
    Capability(CapabilityValue),
    /// Legacy path capability
    PathCapability(PathCapabilityValue),
    /// Legacy path link
    PathLink(PathLinkValue),
    /// Account capability controller
    AccountCapabilityController(AccountCapabilityControllerValue),
    /// Storage capability controller
    StorageCapabilityController(StorageCapabilityControllerValue),
}

impl Value {
    /// Wrap as present optional
    #[inline]
    #[must_use]
    pub fn some(inner: Value) -> Self {
        Self::Some(Box::new(inner))
    }

    /// String value
    #[inline]
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Type value with a known type
    #[inline]
    #[must_use]
    pub fn type_value(static_type: StaticType) -> Self {
        Self::Type(TypeValue {
            static_type: Some(static_type),
        })
    }

    /// Check if this is a container the traversal descends into
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Some(_) | Self::Array(_) | Self::Dictionary(_) | Self::Composite(_)
        )
    }

    /// Variant name, for diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Some(_) => "Some",
            Self::Nil => "Nil",
            Self::Array(_) => "Array",
            Self::Dictionary(_) => "Dictionary",
            Self::Composite(_) => "Composite",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::String(_) => "String",
            Self::Address(_) => "Address",
            Self::Path(_) => "Path",
            Self::Type(_) => "Type",
            Self::Capability(_) => "Capability",
            Self::PathCapability(_) => "PathCapability",
            Self::PathLink(_) => "PathLink",
            Self::AccountCapabilityController(_) => "AccountCapabilityController",
            Self::StorageCapabilityController(_) => "StorageCapabilityController",
        }
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Self::Array(array)
    }
}

impl From<DictionaryValue> for Value {
    fn from(dictionary: DictionaryValue) -> Self {
        Self::Dictionary(dictionary)
    }
}

impl From<CompositeValue> for Value {
    fn from(composite: CompositeValue) -> Self {
        Self::Composite(composite)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(inner) => inner.fmt(f),
            Self::Nil => f.write_str("nil"),
            Self::Array(array) => {
                f.write_str("[")?;
                for (i, element) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Dictionary(dictionary) => {
                f.write_str("{")?;
                for (i, (key, value)) in dictionary.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Composite(composite) => {
                write!(f, "{}(", composite.type_id())?;
                for (i, name) in composite.field_names().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match composite.get_field(name) {
                        Some(value) => write!(f, "{name}: {value}")?,
                        None => f.write_str(name)?,
                    }
                }
                f.write_str(")")
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Address(address) => address.fmt(f),
            Self::Path(path) => path.fmt(f),
            Self::Type(t) => match &t.static_type {
                Some(static_type) => write!(f, "Type<{static_type}>()"),
                None => f.write_str("Type<Unknown>()"),
            },
            Self::Capability(c) => write!(
                f,
                "Capability<{}>(address: {}, id: {})",
                c.borrow_type, c.address, c.id
            ),
            Self::PathCapability(c) => match &c.borrow_type {
                Some(borrow) => write!(
                    f,
                    "Capability<{borrow}>(address: {}, path: {})",
                    c.address, c.path
                ),
                None => write!(f, "Capability(address: {}, path: {})", c.address, c.path),
            },
            Self::PathLink(link) => write!(f, "PathLink<{}>({})", link.borrow_type, link.target_path),
            Self::AccountCapabilityController(c) => write!(
                f,
                "AccountCapabilityController(borrowType: {}, capabilityID: {})",
                c.borrow_type, c.capability_id
            ),
            Self::StorageCapabilityController(c) => write!(
                f,
                "StorageCapabilityController(borrowType: {}, capabilityID: {}, target: {})",
                c.borrow_type, c.capability_id, c.target_path
            ),
        }
    }
}
