//! Testing utilities for the storage migration workspace
//!
//! Shared fixtures, storage builders and proptest strategies.

#![allow(missing_docs)]

use mig_core::{InMemoryStorage, StorageKey, StorageMapKey, StorageSnapshot};
use mig_types::{
    Address, Authorization, EntitlementSetKind, InterfaceStaticType, IntersectionStaticType,
    Location, PrimitiveStaticType, StaticType, TypeId,
};
use mig_values::{ArrayValue, PathDomain, Value};
use proptest::prelude::*;

pub fn test_address() -> Address {
    Address::from_u64(0x1)
}

pub fn contract_location(address: Address, name: &str) -> Location {
    Location::Address {
        address,
        name: name.to_string(),
    }
}

pub fn test_location() -> Location {
    contract_location(test_address(), "Test")
}

pub fn interface_type(name: &str) -> InterfaceStaticType {
    InterfaceStaticType::new(Some(test_location()), format!("Test.{name}"))
}

pub fn composite_type(name: &str) -> StaticType {
    StaticType::composite(Some(test_location()), format!("Test.{name}"))
}

pub fn intersection_of(names: &[&str]) -> StaticType {
    StaticType::Intersection(IntersectionStaticType::new(
        names.iter().map(|n| interface_type(n)).collect(),
    ))
}

pub fn storage_key(domain: PathDomain) -> StorageKey {
    StorageKey::new(test_address(), domain)
}

pub fn storage_map_key(key: &str) -> StorageMapKey {
    StorageMapKey::from(key)
}

/// `[T]` array of type values
pub fn type_value_array(types: impl IntoIterator<Item = StaticType>) -> Value {
    Value::Array(ArrayValue::new(
        StaticType::variable_sized(PrimitiveStaticType::MetaType.into()),
        types.into_iter().map(Value::type_value).collect(),
    ))
}

/// Storage holding `value` at `(test_address(), domain, key)`
pub fn storage_with(domain: PathDomain, key: &str, value: Value) -> InMemoryStorage {
    let mut snapshot = StorageSnapshot::new();
    snapshot.write(test_address(), domain, key, value);
    InMemoryStorage::from_snapshot(snapshot)
}

/// Any primitive kind, legacy ones included
pub fn arb_primitive() -> impl Strategy<Value = PrimitiveStaticType> {
    proptest::sample::select(PrimitiveStaticType::ALL.to_vec())
}

pub fn arb_interface() -> impl Strategy<Value = InterfaceStaticType> {
    "[A-Z][a-z]{0,3}".prop_map(|name| interface_type(&name))
}

pub fn arb_authorization() -> impl Strategy<Value = Authorization> {
    prop_oneof![
        Just(Authorization::Unauthorized),
        (
            proptest::collection::vec("[A-Z][a-z]{0,3}", 1..4),
            any::<bool>()
        )
            .prop_map(|(ids, disjunction)| {
                let kind = if disjunction {
                    EntitlementSetKind::Disjunction
                } else {
                    EntitlementSetKind::Conjunction
                };
                Authorization::entitlement_set(ids.into_iter().map(TypeId::from), kind)
            }),
        "[A-Z][a-z]{0,3}".prop_map(Authorization::entitlement_map),
    ]
}

/// Static types of bounded depth, covering every persistable constructor
pub fn arb_static_type() -> impl Strategy<Value = StaticType> {
    let leaf = prop_oneof![
        arb_primitive().prop_map(StaticType::Primitive),
        "[A-Z][a-z]{0,3}".prop_map(|name| composite_type(&name)),
        arb_interface().prop_map(StaticType::Interface),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(StaticType::variable_sized),
            (inner.clone(), 0u64..8).prop_map(|(t, n)| StaticType::constant_sized(t, n)),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| StaticType::dictionary(k, v)),
            inner.clone().prop_map(StaticType::optional),
            proptest::option::of(inner.clone()).prop_map(StaticType::capability),
            (arb_authorization(), inner.clone()).prop_map(|(a, t)| StaticType::reference(a, t)),
            (
                proptest::collection::vec(arb_interface(), 0..4),
                proptest::option::of(inner)
            )
                .prop_map(|(types, legacy)| {
                    let intersection = IntersectionStaticType::new(types);
                    StaticType::Intersection(match legacy {
                        Some(legacy) => intersection.with_legacy_type(legacy),
                        None => intersection,
                    })
                }),
        ]
    })
}
