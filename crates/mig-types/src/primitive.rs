//! Primitive static types
//!
//! The closed set of built-in type kinds. Several account-related kinds are
//! deprecated and only survive in previously persisted data; they are the
//! input of the static type migration.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

macro_rules! primitive_static_types {
    ($($(#[$meta:meta])* $variant:ident => $name:literal),+ $(,)?) => {
        /// Built-in type kind
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum PrimitiveStaticType {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl PrimitiveStaticType {
            /// Every primitive kind, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Source-level name of the kind
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

primitive_static_types! {
    /// `Void`
    Void => "Void",
    /// `Any`
    Any => "Any",
    /// `Never`
    Never => "Never",
    /// `AnyStruct`
    AnyStruct => "AnyStruct",
    /// `AnyResource`
    AnyResource => "AnyResource",
    /// `Bool`
    Bool => "Bool",
    /// `Address`
    Address => "Address",
    /// `String`
    String => "String",
    /// `Character`
    Character => "Character",
    /// `Type`
    MetaType => "Type",
    /// `Block`
    Block => "Block",
    /// `Number`
    Number => "Number",
    /// `SignedNumber`
    SignedNumber => "SignedNumber",
    /// `Integer`
    Integer => "Integer",
    /// `SignedInteger`
    SignedInteger => "SignedInteger",
    /// `FixedPoint`
    FixedPoint => "FixedPoint",
    /// `SignedFixedPoint`
    SignedFixedPoint => "SignedFixedPoint",
    /// `Int`
    Int => "Int",
    /// `Int8`
    Int8 => "Int8",
    /// `Int16`
    Int16 => "Int16",
    /// `Int32`
    Int32 => "Int32",
    /// `Int64`
    Int64 => "Int64",
    /// `Int128`
    Int128 => "Int128",
    /// `Int256`
    Int256 => "Int256",
    /// `UInt`
    UInt => "UInt",
    /// `UInt8`
    UInt8 => "UInt8",
    /// `UInt16`
    UInt16 => "UInt16",
    /// `UInt32`
    UInt32 => "UInt32",
    /// `UInt64`
    UInt64 => "UInt64",
    /// `UInt128`
    UInt128 => "UInt128",
    /// `UInt256`
    UInt256 => "UInt256",
    /// `Word8`
    Word8 => "Word8",
    /// `Word16`
    Word16 => "Word16",
    /// `Word32`
    Word32 => "Word32",
    /// `Word64`
    Word64 => "Word64",
    /// `Fix64`
    Fix64 => "Fix64",
    /// `UFix64`
    UFix64 => "UFix64",
    /// `Path`
    Path => "Path",
    /// Unparameterized `Capability`
    Capability => "Capability",
    /// `StoragePath`
    StoragePath => "StoragePath",
    /// `CapabilityPath`
    CapabilityPath => "CapabilityPath",
    /// `PublicPath`
    PublicPath => "PublicPath",
    /// `PrivatePath`
    PrivatePath => "PrivatePath",

    /// Deprecated `AuthAccount`
    AuthAccount => "AuthAccount",
    /// Deprecated `PublicAccount`
    PublicAccount => "PublicAccount",
    /// Deprecated `AuthAccount.Contracts`
    AuthAccountContracts => "AuthAccount.Contracts",
    /// Deprecated `PublicAccount.Contracts`
    PublicAccountContracts => "PublicAccount.Contracts",
    /// Deprecated `AuthAccount.Keys`
    AuthAccountKeys => "AuthAccount.Keys",
    /// Deprecated `PublicAccount.Keys`
    PublicAccountKeys => "PublicAccount.Keys",
    /// Deprecated `AuthAccount.Inbox`
    AuthAccountInbox => "AuthAccount.Inbox",
    /// Deprecated `AuthAccount.StorageCapabilities`
    AuthAccountStorageCapabilities => "AuthAccount.StorageCapabilities",
    /// Deprecated `AuthAccount.AccountCapabilities`
    AuthAccountAccountCapabilities => "AuthAccount.AccountCapabilities",
    /// Deprecated `AuthAccount.Capabilities`
    AuthAccountCapabilities => "AuthAccount.Capabilities",
    /// Deprecated `PublicAccount.Capabilities`
    PublicAccountCapabilities => "PublicAccount.Capabilities",
    /// Deprecated primitive `AccountKey`, replaced by a built-in composite
    AccountKey => "AccountKey",

    /// `Account`
    Account => "Account",
    /// `Account.Storage`
    AccountStorage => "Account.Storage",
    /// `Account.Contracts`
    AccountContracts => "Account.Contracts",
    /// `Account.Keys`
    AccountKeys => "Account.Keys",
    /// `Account.Inbox`
    AccountInbox => "Account.Inbox",
    /// `Account.StorageCapabilities`
    AccountStorageCapabilities => "Account.StorageCapabilities",
    /// `Account.AccountCapabilities`
    AccountAccountCapabilities => "Account.AccountCapabilities",
    /// `Account.Capabilities`
    AccountCapabilities => "Account.Capabilities",
    /// `StorageCapabilityController`
    StorageCapabilityController => "StorageCapabilityController",
    /// `AccountCapabilityController`
    AccountCapabilityController => "AccountCapabilityController",
    /// `DeploymentResult`
    DeploymentResult => "DeploymentResult",
}

impl PrimitiveStaticType {
    /// Size in bytes of the largest inhabitant, `None` if arbitrarily large
    #[must_use]
    pub const fn element_size(self) -> Option<u32> {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 | Self::Word8 => Some(1),
            Self::Int16 | Self::UInt16 | Self::Word16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Word32 => Some(4),
            Self::Int64
            | Self::UInt64
            | Self::Word64
            | Self::Fix64
            | Self::UFix64
            | Self::Address => Some(8),
            Self::Int128 | Self::UInt128 => Some(16),
            Self::Int256 | Self::UInt256 => Some(32),
            _ => None,
        }
    }

    /// Kind only found in legacy data
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::AuthAccount
                | Self::PublicAccount
                | Self::AuthAccountContracts
                | Self::PublicAccountContracts
                | Self::AuthAccountKeys
                | Self::PublicAccountKeys
                | Self::AuthAccountInbox
                | Self::AuthAccountStorageCapabilities
                | Self::AuthAccountAccountCapabilities
                | Self::AuthAccountCapabilities
                | Self::PublicAccountCapabilities
                | Self::AccountKey
        )
    }
}

impl Display for PrimitiveStaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
