//! Static types
//!
//! A [`StaticType`] is a shallow, serializable representation of a semantic
//! type. Nominal types are referred to by ID only, so static types can be
//! persisted alongside values without dragging in full type declarations.
//!
//! # Equality
//! - [`CompositeStaticType`] compares by type ID
//! - [`InterfaceStaticType`] compares by location and qualified identifier
//! - [`IntersectionStaticType`] compares its interface sets, ignoring order,
//!   duplicates and the legacy type
//! - every other variant compares structurally
//!
//! Static types are immutable. A rewrite builds a new tree and leaves the old
//! one intact, since sibling values may still share it.

use crate::authorization::Authorization;
use crate::common::{type_id_from_qualified_name, Location, TypeId};
use crate::primitive::PrimitiveStaticType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Shallow representation of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum StaticType {
    /// User-defined composite (struct, resource, contract, event, enum)
    Composite(CompositeStaticType),

    /// Interface
    Interface(InterfaceStaticType),

    /// `[T]`
    VariableSized(VariableSizedStaticType),

    /// `[T; n]`
    ConstantSized(ConstantSizedStaticType),

    /// `{K: V}`
    Dictionary(DictionaryStaticType),

    /// `T?`
    Optional(OptionalStaticType),

    /// `{I1, I2}`
    Intersection(IntersectionStaticType),

    /// `auth(...) &T`
    Reference(ReferenceStaticType),

    /// `Capability<T>`
    Capability(CapabilityStaticType),

    /// Function type; never persisted
    Function(FunctionStaticType),

    /// Built-in kind
    Primitive(PrimitiveStaticType),
}

impl StaticType {
    /// `[element]`
    #[inline]
    #[must_use]
    pub fn variable_sized(element: StaticType) -> Self {
        Self::VariableSized(VariableSizedStaticType {
            element: Box::new(element),
        })
    }

    /// `[element; size]`
    #[inline]
    #[must_use]
    pub fn constant_sized(element: StaticType, size: u64) -> Self {
        Self::ConstantSized(ConstantSizedStaticType {
            element: Box::new(element),
            size,
        })
    }

    /// `{key: value}`
    #[inline]
    #[must_use]
    pub fn dictionary(key: StaticType, value: StaticType) -> Self {
        Self::Dictionary(DictionaryStaticType {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// `inner?`
    #[inline]
    #[must_use]
    pub fn optional(inner: StaticType) -> Self {
        Self::Optional(OptionalStaticType {
            inner: Box::new(inner),
        })
    }

    /// `authorization &referenced`
    #[inline]
    #[must_use]
    pub fn reference(authorization: Authorization, referenced: StaticType) -> Self {
        Self::Reference(ReferenceStaticType::new(authorization, referenced))
    }

    /// `Capability<borrow>`, or the unparameterized capability when `None`
    #[inline]
    #[must_use]
    pub fn capability(borrow_type: Option<StaticType>) -> Self {
        Self::Capability(CapabilityStaticType {
            borrow_type: borrow_type.map(Box::new),
        })
    }

    /// Intersection without legacy type
    #[inline]
    #[must_use]
    pub fn intersection(types: Vec<InterfaceStaticType>) -> Self {
        Self::Intersection(IntersectionStaticType::new(types))
    }

    /// Composite with its type ID computed from the location
    #[inline]
    #[must_use]
    pub fn composite(location: Option<Location>, qualified_identifier: impl Into<String>) -> Self {
        Self::Composite(CompositeStaticType::with_computed_type_id(
            location,
            qualified_identifier,
        ))
    }

    /// Interface
    #[inline]
    #[must_use]
    pub fn interface(location: Option<Location>, qualified_identifier: impl Into<String>) -> Self {
        Self::Interface(InterfaceStaticType::new(location, qualified_identifier))
    }

    /// Type of `nil`: `Never?`
    #[inline]
    #[must_use]
    pub fn nil() -> Self {
        Self::optional(Self::Primitive(PrimitiveStaticType::Never))
    }

    /// Built-in `AccountKey` composite, the replacement of the legacy primitive
    #[inline]
    #[must_use]
    pub fn account_key() -> Self {
        Self::Composite(CompositeStaticType::new(
            None,
            "AccountKey",
            TypeId::new("AccountKey"),
        ))
    }

    /// Size in bytes of the largest inhabitant, `None` if arbitrarily large
    ///
    /// Only used for storage cost estimation.
    #[must_use]
    pub fn element_size(&self) -> Option<u32> {
        match self {
            Self::Primitive(primitive) => primitive.element_size(),
            _ => None,
        }
    }

    /// Interface payload, if this is an interface type
    #[inline]
    #[must_use]
    pub fn as_interface(&self) -> Option<&InterfaceStaticType> {
        match self {
            Self::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    /// Reference payload, if this is a reference type
    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<&ReferenceStaticType> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

impl From<PrimitiveStaticType> for StaticType {
    fn from(primitive: PrimitiveStaticType) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<InterfaceStaticType> for StaticType {
    fn from(interface: InterfaceStaticType) -> Self {
        Self::Interface(interface)
    }
}

impl From<CompositeStaticType> for StaticType {
    fn from(composite: CompositeStaticType) -> Self {
        Self::Composite(composite)
    }
}

impl From<ReferenceStaticType> for StaticType {
    fn from(reference: ReferenceStaticType) -> Self {
        Self::Reference(reference)
    }
}

impl Display for StaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(t) => t.fmt(f),
            Self::Interface(t) => t.fmt(f),
            Self::VariableSized(t) => write!(f, "[{}]", t.element),
            Self::ConstantSized(t) => write!(f, "[{}; {}]", t.element, t.size),
            Self::Dictionary(t) => write!(f, "{{{}: {}}}", t.key, t.value),
            Self::Optional(t) => write!(f, "{}?", t.inner),
            Self::Intersection(t) => t.fmt(f),
            Self::Reference(t) => write!(f, "{}&{}", t.authorization, t.referenced_type),
            Self::Capability(t) => match &t.borrow_type {
                Some(borrow) => write!(f, "Capability<{borrow}>"),
                None => f.write_str("Capability"),
            },
            Self::Function(t) => t.signature.fmt(f),
            Self::Primitive(t) => t.fmt(f),
        }
    }
}

/// Composite type, referred to by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeStaticType {
    /// Declaring location, `None` for built-ins
    pub location: Option<Location>,
    /// Qualified identifier (`Contract.Nested`)
    pub qualified_identifier: String,
    /// Globally unique type ID
    pub type_id: TypeId,
}

impl CompositeStaticType {
    /// Create composite with an explicit type ID
    #[inline]
    #[must_use]
    pub fn new(
        location: Option<Location>,
        qualified_identifier: impl Into<String>,
        type_id: TypeId,
    ) -> Self {
        Self {
            location,
            qualified_identifier: qualified_identifier.into(),
            type_id,
        }
    }

    /// Create composite, deriving the type ID from the location
    #[must_use]
    pub fn with_computed_type_id(
        location: Option<Location>,
        qualified_identifier: impl Into<String>,
    ) -> Self {
        let qualified_identifier = qualified_identifier.into();
        let type_id = type_id_from_qualified_name(location.as_ref(), &qualified_identifier);
        Self {
            location,
            qualified_identifier,
            type_id,
        }
    }
}

impl PartialEq for CompositeStaticType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CompositeStaticType {}

impl Hash for CompositeStaticType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Display for CompositeStaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.location {
            None => f.write_str(&self.qualified_identifier),
            Some(_) => write!(f, "{}", self.type_id),
        }
    }
}

/// Interface type, referred to by location and qualified identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceStaticType {
    /// Declaring location, `None` for built-ins
    pub location: Option<Location>,
    /// Qualified identifier
    pub qualified_identifier: String,
}

impl InterfaceStaticType {
    /// Create interface type
    #[inline]
    #[must_use]
    pub fn new(location: Option<Location>, qualified_identifier: impl Into<String>) -> Self {
        Self {
            location,
            qualified_identifier: qualified_identifier.into(),
        }
    }

    /// Type ID derived from the location
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        type_id_from_qualified_name(self.location.as_ref(), &self.qualified_identifier)
    }
}

impl Display for InterfaceStaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.location {
            None => f.write_str(&self.qualified_identifier),
            Some(location) => write!(f, "{}", location.type_id(&self.qualified_identifier)),
        }
    }
}

/// `[T]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableSizedStaticType {
    /// Element type
    pub element: Box<StaticType>,
}

/// `[T; n]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstantSizedStaticType {
    /// Element type
    pub element: Box<StaticType>,
    /// Fixed length
    pub size: u64,
}

/// `{K: V}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictionaryStaticType {
    /// Key type
    pub key: Box<StaticType>,
    /// Value type
    pub value: Box<StaticType>,
}

/// `T?`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionalStaticType {
    /// Wrapped type
    pub inner: Box<StaticType>,
}

/// `{I1, I2}` with an optional legacy type (`T{I1, I2}` in old data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionStaticType {
    /// Interface set; order is not significant
    pub types: Vec<InterfaceStaticType>,
    /// Restricted type carried over from the legacy restricted-type syntax
    pub legacy_type: Option<Box<StaticType>>,
}

impl IntersectionStaticType {
    /// Create intersection without legacy type
    #[inline]
    #[must_use]
    pub fn new(types: Vec<InterfaceStaticType>) -> Self {
        Self {
            types,
            legacy_type: None,
        }
    }

    /// Set the legacy type
    #[inline]
    #[must_use]
    pub fn with_legacy_type(mut self, legacy_type: StaticType) -> Self {
        self.legacy_type = Some(Box::new(legacy_type));
        self
    }

    /// Number of distinct interfaces
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.types
            .iter()
            .enumerate()
            .filter(|(i, t)| !self.types[..*i].contains(t))
            .count()
    }
}

impl PartialEq for IntersectionStaticType {
    fn eq(&self, other: &Self) -> bool {
        self.types.iter().all(|t| other.types.contains(t))
            && other.types.iter().all(|t| self.types.contains(t))
    }
}

impl Eq for IntersectionStaticType {}

impl Hash for IntersectionStaticType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.distinct_count().hash(state);
    }
}

impl Display for IntersectionStaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, t) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            t.fmt(f)?;
        }
        f.write_str("}")
    }
}

/// `auth(...) &T`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceStaticType {
    /// Access qualifier
    pub authorization: Authorization,
    /// Type of the referenced value
    pub referenced_type: Box<StaticType>,
}

impl ReferenceStaticType {
    /// Create reference type
    #[inline]
    #[must_use]
    pub fn new(authorization: Authorization, referenced_type: StaticType) -> Self {
        Self {
            authorization,
            referenced_type: Box::new(referenced_type),
        }
    }
}

impl Display for ReferenceStaticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}&{}", self.authorization, self.referenced_type)
    }
}

/// `Capability<T>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityStaticType {
    /// Borrow type; `None` for an unparameterized capability
    pub borrow_type: Option<Box<StaticType>>,
}

/// Function type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionStaticType {
    /// Signature
    pub signature: FunctionSignature,
}

/// Parameter and return types of a function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Generic parameters
    pub type_parameters: Vec<TypeParameter>,
    /// Parameter types, in order
    pub parameters: Vec<StaticType>,
    /// Return type
    pub return_type: Box<StaticType>,
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("fun")?;
        if !self.type_parameters.is_empty() {
            f.write_str("<")?;
            for (i, p) in self.type_parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                p.fmt(f)?;
            }
            f.write_str(">")?;
        }
        f.write_str("(")?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            p.fmt(f)?;
        }
        write!(f, "): {}", self.return_type)
    }
}

/// Generic parameter of a function type
///
/// The name is not part of equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name
    pub name: String,
    /// Upper bound
    pub type_bound: Option<Box<StaticType>>,
    /// Whether the parameter may be omitted
    pub optional: bool,
}

impl PartialEq for TypeParameter {
    fn eq(&self, other: &Self) -> bool {
        self.type_bound == other.type_bound && self.optional == other.optional
    }
}

impl Eq for TypeParameter {}

impl Hash for TypeParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_bound.hash(state);
        self.optional.hash(state);
    }
}

impl Display for TypeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(bound) = &self.type_bound {
            write!(f, ": {bound}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::EntitlementSetKind;
    use crate::common::Address;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    fn test_location() -> Location {
        Location::Address {
            address: Address::from_u64(1),
            name: "Test".into(),
        }
    }

    fn interface(name: &str) -> InterfaceStaticType {
        InterfaceStaticType::new(Some(test_location()), name)
    }

    #[test]
    fn composite_equality_is_nominal() {
        let a = CompositeStaticType::new(None, "A", TypeId::new("S.test.A"));
        let b = CompositeStaticType::new(Some(test_location()), "B", TypeId::new("S.test.A"));
        assert_eq!(StaticType::Composite(a), StaticType::Composite(b));
    }

    #[test]
    fn interface_equality_uses_location_and_identifier() {
        assert_eq!(interface("I"), interface("I"));
        assert_ne!(interface("I"), InterfaceStaticType::new(None, "I"));
    }

    #[test]
    fn structural_equality_recurses() {
        let a = StaticType::dictionary(
            PrimitiveStaticType::String.into(),
            StaticType::variable_sized(PrimitiveStaticType::Int.into()),
        );
        let b = StaticType::dictionary(
            PrimitiveStaticType::String.into(),
            StaticType::variable_sized(PrimitiveStaticType::Int.into()),
        );
        let c = StaticType::dictionary(
            PrimitiveStaticType::String.into(),
            StaticType::variable_sized(PrimitiveStaticType::UInt.into()),
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn constant_sized_equality_includes_size() {
        let a = StaticType::constant_sized(PrimitiveStaticType::Int.into(), 2);
        let b = StaticType::constant_sized(PrimitiveStaticType::Int.into(), 3);
        assert_ne!(a, b);
    }

    #[test]
    fn intersection_equality_ignores_order_and_legacy_type() {
        let a = IntersectionStaticType::new(vec![interface("I1"), interface("I2")]);
        let b = IntersectionStaticType::new(vec![interface("I2"), interface("I1")])
            .with_legacy_type(PrimitiveStaticType::AnyStruct.into());
        assert_eq!(a, b);

        let c = IntersectionStaticType::new(vec![interface("I1")]);
        assert_ne!(a, c);
    }

    #[test]
    fn intersection_equality_ignores_duplicates() {
        let dup = IntersectionStaticType::new(vec![interface("I1"), interface("I1")]);
        let single = IntersectionStaticType::new(vec![interface("I1")]);
        let pair = IntersectionStaticType::new(vec![interface("I1"), interface("I2")]);

        assert_eq!(dup, single);
        assert_eq!(single, dup);
        assert_eq!(dup.distinct_count(), 1);
        assert_ne!(dup, pair);
        assert_ne!(pair, dup);
        assert_eq!(
            hash_of(&StaticType::Intersection(dup)),
            hash_of(&StaticType::Intersection(single))
        );
    }

    #[test]
    fn reference_equality_includes_authorization() {
        let unauthorized =
            StaticType::reference(Authorization::Unauthorized, PrimitiveStaticType::Int.into());
        let authorized = StaticType::reference(
            Authorization::entitlement_set([TypeId::from("E")], EntitlementSetKind::Conjunction),
            PrimitiveStaticType::Int.into(),
        );
        assert_ne!(unauthorized, authorized);
    }

    #[test]
    fn capability_borrow_types_both_none_or_equal() {
        assert_eq!(StaticType::capability(None), StaticType::capability(None));
        assert_ne!(
            StaticType::capability(None),
            StaticType::capability(Some(PrimitiveStaticType::Int.into()))
        );
    }

    #[test]
    fn type_parameter_name_is_not_significant() {
        let a = TypeParameter {
            name: "T".into(),
            type_bound: None,
            optional: false,
        };
        let b = TypeParameter {
            name: "U".into(),
            type_bound: None,
            optional: false,
        };
        assert_eq!(a, b);
    }

    #[test]
    fn display_strings() {
        let loc = test_location();
        assert_eq!(
            StaticType::composite(Some(loc.clone()), "Test.R").to_string(),
            "A.0000000000000001.Test.R"
        );
        assert_eq!(StaticType::composite(None, "AccountKey").to_string(), "AccountKey");
        assert_eq!(
            StaticType::variable_sized(PrimitiveStaticType::Int.into()).to_string(),
            "[Int]"
        );
        assert_eq!(
            StaticType::constant_sized(PrimitiveStaticType::Int.into(), 4).to_string(),
            "[Int; 4]"
        );
        assert_eq!(
            StaticType::dictionary(
                PrimitiveStaticType::String.into(),
                PrimitiveStaticType::Bool.into()
            )
            .to_string(),
            "{String: Bool}"
        );
        assert_eq!(
            StaticType::optional(PrimitiveStaticType::Int.into()).to_string(),
            "Int?"
        );
        assert_eq!(
            StaticType::intersection(vec![
                InterfaceStaticType::new(None, "I1"),
                InterfaceStaticType::new(None, "I2"),
            ])
            .to_string(),
            "{I1, I2}"
        );
        assert_eq!(
            StaticType::reference(Authorization::Unauthorized, PrimitiveStaticType::Account.into())
                .to_string(),
            "&Account"
        );
        assert_eq!(
            StaticType::reference(
                Authorization::entitlement_map("M"),
                PrimitiveStaticType::Int.into()
            )
            .to_string(),
            "auth(M) &Int"
        );
        assert_eq!(StaticType::capability(None).to_string(), "Capability");
        assert_eq!(
            StaticType::capability(Some(PrimitiveStaticType::Int.into())).to_string(),
            "Capability<Int>"
        );
    }

    #[test]
    fn function_display() {
        let function = StaticType::Function(FunctionStaticType {
            signature: FunctionSignature {
                type_parameters: vec![TypeParameter {
                    name: "T".into(),
                    type_bound: Some(Box::new(PrimitiveStaticType::AnyStruct.into())),
                    optional: false,
                }],
                parameters: vec![PrimitiveStaticType::Int.into(), PrimitiveStaticType::String.into()],
                return_type: Box::new(PrimitiveStaticType::Bool.into()),
            },
        });
        assert_eq!(function.to_string(), "fun<T: AnyStruct>(Int, String): Bool");
    }

    #[test]
    fn element_sizes() {
        assert_eq!(StaticType::from(PrimitiveStaticType::UInt64).element_size(), Some(8));
        assert_eq!(StaticType::nil().element_size(), None);
        assert_eq!(StaticType::account_key().element_size(), None);
    }

    #[test]
    fn serde_round_trip_preserves_legacy_type() {
        let t = StaticType::Intersection(
            IntersectionStaticType::new(vec![interface("I")])
                .with_legacy_type(PrimitiveStaticType::AnyResource.into()),
        );
        let json = serde_json::to_string(&t).unwrap();
        let back: StaticType = serde_json::from_str(&json).unwrap();
        let StaticType::Intersection(back) = back else {
            panic!("expected intersection");
        };
        assert_eq!(
            back.legacy_type.as_deref(),
            Some(&StaticType::Primitive(PrimitiveStaticType::AnyResource))
        );
    }

    fn hash_of(t: &StaticType) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }

    fn arb_interfaces() -> impl Strategy<Value = Vec<InterfaceStaticType>> {
        proptest::collection::vec("[A-C]", 0..4)
            .prop_map(|names| names.iter().map(|n| interface(n)).collect())
    }

    fn arb_type() -> impl Strategy<Value = StaticType> {
        let leaf = prop_oneof![
            proptest::sample::select(PrimitiveStaticType::ALL.to_vec()).prop_map(StaticType::Primitive),
            "[A-Z][a-z]{0,3}".prop_map(|n| StaticType::Interface(interface(&n))),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(StaticType::variable_sized),
                inner.clone().prop_map(StaticType::optional),
                (inner.clone(), inner).prop_map(|(k, v)| StaticType::dictionary(k, v)),
                arb_interfaces().prop_map(StaticType::intersection),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_equality_is_reflexive_and_hash_consistent(t in arb_type()) {
            let copy = t.clone();
            prop_assert_eq!(&t, &copy);
            prop_assert_eq!(hash_of(&t), hash_of(&copy));
        }

        #[test]
        fn prop_intersection_equality_is_symmetric(a in arb_interfaces(), b in arb_interfaces()) {
            let a = StaticType::intersection(a);
            let b = StaticType::intersection(b);
            prop_assert_eq!(a == b, b == a);
            if a == b {
                prop_assert_eq!(hash_of(&a), hash_of(&b));
            }
        }

        #[test]
        fn prop_intersection_equality_ignores_member_order(types in arb_interfaces()) {
            let reversed: Vec<_> = types.iter().rev().cloned().collect();
            let forward = StaticType::intersection(types);
            let backward = StaticType::intersection(reversed);
            prop_assert_eq!(hash_of(&forward), hash_of(&backward));
            prop_assert_eq!(forward, backward);
        }
    }
}
