//! Semantic type contract
//!
//! The type checker owns the full semantic types. This module only models the
//! parts of them that cross the boundary into static types, and converts in
//! both directions:
//!
//! - [`convert_sema_to_static_type`] / [`convert_sema_access_to_static_authorization`]
//! - [`convert_static_to_sema_type`] / [`convert_static_authorization_to_sema_access`]
//!
//! Going from static to semantic types needs the declarations behind nominal
//! IDs; callers supply them through a [`SemaTypeResolver`].

use crate::authorization::{Authorization, EntitlementSetKind};
use crate::common::{type_id_from_qualified_name, Location, TypeId};
use crate::error::TypeConversionError;
use crate::primitive::PrimitiveStaticType;
use crate::static_type::{
    FunctionSignature, FunctionStaticType, InterfaceStaticType, IntersectionStaticType,
    ReferenceStaticType, StaticType, TypeParameter,
};
use std::sync::Arc;

/// Declared composite type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeType {
    /// Declaring location
    pub location: Option<Location>,
    /// Qualified identifier
    pub qualified_identifier: String,
}

impl CompositeType {
    /// Type ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        type_id_from_qualified_name(self.location.as_ref(), &self.qualified_identifier)
    }
}

/// Declared interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    /// Declaring location
    pub location: Option<Location>,
    /// Qualified identifier
    pub qualified_identifier: String,
}

/// Declared entitlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementType {
    /// Declaring location
    pub location: Option<Location>,
    /// Qualified identifier
    pub qualified_identifier: String,
}

impl EntitlementType {
    /// Type ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        type_id_from_qualified_name(self.location.as_ref(), &self.qualified_identifier)
    }
}

/// Declared entitlement map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementMapType {
    /// Declaring location
    pub location: Option<Location>,
    /// Qualified identifier
    pub qualified_identifier: String,
}

impl EntitlementMapType {
    /// Type ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        type_id_from_qualified_name(self.location.as_ref(), &self.qualified_identifier)
    }
}

/// Generic parameter of a semantic function type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemaTypeParameter {
    /// Name
    pub name: String,
    /// Upper bound
    pub type_bound: Option<SemaType>,
    /// Whether the parameter may be omitted
    pub optional: bool,
}

/// Semantic function type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    /// Generic parameters
    pub type_parameters: Vec<SemaTypeParameter>,
    /// Parameter types
    pub parameters: Vec<SemaType>,
    /// Return type
    pub return_type: SemaType,
}

/// Access modifier kinds that are not entitlement based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveAccess {
    /// Not specified
    NotSpecified,
    /// Restricted to the declaring scope
    SelfOnly,
    /// Restricted to the declaring contract
    Contract,
    /// Restricted to the declaring account
    Account,
    /// Publicly accessible; the unauthorized reference access
    All,
}

/// Semantic access of a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemaAccess {
    /// Primitive access modifier
    Primitive(PrimitiveAccess),

    /// Entitlement set
    EntitlementSet {
        /// Entitlements, in declaration order
        entitlements: Vec<Arc<EntitlementType>>,
        /// Conjunction or disjunction
        set_kind: EntitlementSetKind,
    },

    /// Entitlement map
    EntitlementMap(Arc<EntitlementMapType>),
}

impl SemaAccess {
    /// Access of an unauthorized reference
    pub const UNAUTHORIZED: Self = Self::Primitive(PrimitiveAccess::All);
}

/// Semantic type, as far as static types can express it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemaType {
    /// Built-in type
    Simple(PrimitiveStaticType),
    /// Composite
    Composite(Arc<CompositeType>),
    /// Interface
    Interface(Arc<InterfaceType>),
    /// `[T]`
    VariableSized(Box<SemaType>),
    /// `[T; n]`
    ConstantSized(Box<SemaType>, u64),
    /// `{K: V}`
    Dictionary(Box<SemaType>, Box<SemaType>),
    /// `T?`
    Optional(Box<SemaType>),
    /// `{I1, I2}`
    Intersection(Vec<Arc<InterfaceType>>),
    /// Reference
    Reference {
        /// Access
        authorization: SemaAccess,
        /// Referenced type
        referenced: Box<SemaType>,
    },
    /// `Capability<T>`, unparameterized when `None`
    Capability(Option<Box<SemaType>>),
    /// Function
    Function(Arc<FunctionType>),
}

/// Looks up declarations behind nominal IDs
pub trait SemaTypeResolver {
    /// Interface declared at `location`
    ///
    /// # Errors
    /// Returns error if no such interface is declared
    fn interface(
        &self,
        location: Option<&Location>,
        qualified_identifier: &str,
    ) -> Result<Arc<InterfaceType>, TypeConversionError>;

    /// Composite declared at `location`
    ///
    /// # Errors
    /// Returns error if no such composite is declared
    fn composite(
        &self,
        location: Option<&Location>,
        qualified_identifier: &str,
        type_id: &TypeId,
    ) -> Result<Arc<CompositeType>, TypeConversionError>;

    /// Entitlement with `type_id`
    ///
    /// # Errors
    /// Returns error if no such entitlement is declared
    fn entitlement(&self, type_id: &TypeId) -> Result<Arc<EntitlementType>, TypeConversionError>;

    /// Entitlement map with `type_id`
    ///
    /// # Errors
    /// Returns error if no such entitlement map is declared
    fn entitlement_map(
        &self,
        type_id: &TypeId,
    ) -> Result<Arc<EntitlementMapType>, TypeConversionError>;
}

/// Convert a semantic access to a static authorization
///
/// # Errors
/// Returns [`TypeConversionError::UnsupportedAccess`] for primitive accesses
/// other than `All`, which no reference can carry.
pub fn convert_sema_access_to_static_authorization(
    access: &SemaAccess,
) -> Result<Authorization, TypeConversionError> {
    match access {
        SemaAccess::Primitive(PrimitiveAccess::All) => Ok(Authorization::Unauthorized),
        SemaAccess::Primitive(other) => {
            Err(TypeConversionError::UnsupportedAccess(format!("{other:?}")))
        }
        SemaAccess::EntitlementSet {
            entitlements,
            set_kind,
        } => Ok(Authorization::entitlement_set(
            entitlements.iter().map(|e| e.id()),
            *set_kind,
        )),
        SemaAccess::EntitlementMap(map) => Ok(Authorization::entitlement_map(map.id())),
    }
}

/// Convert a semantic type to a static type
///
/// # Errors
/// Returns error if a reference carries an unsupported access
pub fn convert_sema_to_static_type(t: &SemaType) -> Result<StaticType, TypeConversionError> {
    Ok(match t {
        SemaType::Simple(primitive) => StaticType::Primitive(*primitive),
        SemaType::Composite(composite) => StaticType::Composite(
            crate::static_type::CompositeStaticType::new(
                composite.location.clone(),
                composite.qualified_identifier.clone(),
                composite.id(),
            ),
        ),
        SemaType::Interface(interface) => {
            StaticType::Interface(convert_sema_interface_type(interface))
        }
        SemaType::VariableSized(element) => {
            StaticType::variable_sized(convert_sema_to_static_type(element)?)
        }
        SemaType::ConstantSized(element, size) => {
            StaticType::constant_sized(convert_sema_to_static_type(element)?, *size)
        }
        SemaType::Dictionary(key, value) => StaticType::dictionary(
            convert_sema_to_static_type(key)?,
            convert_sema_to_static_type(value)?,
        ),
        SemaType::Optional(inner) => StaticType::optional(convert_sema_to_static_type(inner)?),
        SemaType::Intersection(types) => StaticType::Intersection(IntersectionStaticType::new(
            types.iter().map(|t| convert_sema_interface_type(t)).collect(),
        )),
        SemaType::Reference {
            authorization,
            referenced,
        } => StaticType::Reference(ReferenceStaticType::new(
            convert_sema_access_to_static_authorization(authorization)?,
            convert_sema_to_static_type(referenced)?,
        )),
        SemaType::Capability(None) => StaticType::Primitive(PrimitiveStaticType::Capability),
        SemaType::Capability(Some(borrow)) => {
            StaticType::capability(Some(convert_sema_to_static_type(borrow)?))
        }
        SemaType::Function(function) => StaticType::Function(FunctionStaticType {
            signature: convert_sema_function_type(function)?,
        }),
    })
}

fn convert_sema_interface_type(t: &InterfaceType) -> InterfaceStaticType {
    InterfaceStaticType::new(t.location.clone(), t.qualified_identifier.clone())
}

fn convert_sema_function_type(t: &FunctionType) -> Result<FunctionSignature, TypeConversionError> {
    let type_parameters = t
        .type_parameters
        .iter()
        .map(|p| -> Result<TypeParameter, TypeConversionError> {
            Ok(TypeParameter {
                name: p.name.clone(),
                type_bound: p
                    .type_bound
                    .as_ref()
                    .map(convert_sema_to_static_type)
                    .transpose()?
                    .map(Box::new),
                optional: p.optional,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let parameters = t
        .parameters
        .iter()
        .map(convert_sema_to_static_type)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FunctionSignature {
        type_parameters,
        parameters,
        return_type: Box::new(convert_sema_to_static_type(&t.return_type)?),
    })
}

/// Convert a static authorization back to a semantic access
///
/// # Errors
/// Returns error if an entitlement or entitlement map cannot be resolved
pub fn convert_static_authorization_to_sema_access<R: SemaTypeResolver + ?Sized>(
    authorization: &Authorization,
    resolver: &R,
) -> Result<SemaAccess, TypeConversionError> {
    match authorization {
        Authorization::Unauthorized => Ok(SemaAccess::UNAUTHORIZED),
        Authorization::EntitlementMap(map) => Ok(SemaAccess::EntitlementMap(
            resolver.entitlement_map(&map.type_id)?,
        )),
        Authorization::EntitlementSet(set) => {
            let entitlements = set
                .entitlements()
                .map(|id| resolver.entitlement(id))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SemaAccess::EntitlementSet {
                entitlements,
                set_kind: set.set_kind(),
            })
        }
    }
}

/// Convert a static type back to a semantic type
///
/// # Errors
/// Returns error if any nominal type, entitlement or entitlement map cannot
/// be resolved
pub fn convert_static_to_sema_type<R: SemaTypeResolver + ?Sized>(
    t: &StaticType,
    resolver: &R,
) -> Result<SemaType, TypeConversionError> {
    Ok(match t {
        StaticType::Composite(composite) => SemaType::Composite(resolver.composite(
            composite.location.as_ref(),
            &composite.qualified_identifier,
            &composite.type_id,
        )?),
        StaticType::Interface(interface) => SemaType::Interface(
            resolver.interface(interface.location.as_ref(), &interface.qualified_identifier)?,
        ),
        StaticType::VariableSized(array) => {
            SemaType::VariableSized(Box::new(convert_static_to_sema_type(&array.element, resolver)?))
        }
        StaticType::ConstantSized(array) => SemaType::ConstantSized(
            Box::new(convert_static_to_sema_type(&array.element, resolver)?),
            array.size,
        ),
        StaticType::Dictionary(dictionary) => SemaType::Dictionary(
            Box::new(convert_static_to_sema_type(&dictionary.key, resolver)?),
            Box::new(convert_static_to_sema_type(&dictionary.value, resolver)?),
        ),
        StaticType::Optional(optional) => {
            SemaType::Optional(Box::new(convert_static_to_sema_type(&optional.inner, resolver)?))
        }
        StaticType::Intersection(intersection) => SemaType::Intersection(
            intersection
                .types
                .iter()
                .map(|i| resolver.interface(i.location.as_ref(), &i.qualified_identifier))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        StaticType::Reference(reference) => SemaType::Reference {
            authorization: convert_static_authorization_to_sema_access(
                &reference.authorization,
                resolver,
            )?,
            referenced: Box::new(convert_static_to_sema_type(
                &reference.referenced_type,
                resolver,
            )?),
        },
        StaticType::Capability(capability) => SemaType::Capability(
            capability
                .borrow_type
                .as_deref()
                .map(|borrow| convert_static_to_sema_type(borrow, resolver))
                .transpose()?
                .map(Box::new),
        ),
        StaticType::Function(function) => {
            SemaType::Function(Arc::new(convert_static_function_signature(
                &function.signature,
                resolver,
            )?))
        }
        StaticType::Primitive(primitive) => SemaType::Simple(*primitive),
    })
}

fn convert_static_function_signature<R: SemaTypeResolver + ?Sized>(
    signature: &FunctionSignature,
    resolver: &R,
) -> Result<FunctionType, TypeConversionError> {
    let type_parameters = signature
        .type_parameters
        .iter()
        .map(|p| -> Result<SemaTypeParameter, TypeConversionError> {
            Ok(SemaTypeParameter {
                name: p.name.clone(),
                type_bound: p
                    .type_bound
                    .as_deref()
                    .map(|bound| convert_static_to_sema_type(bound, resolver))
                    .transpose()?,
                optional: p.optional,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let parameters = signature
        .parameters
        .iter()
        .map(|p| convert_static_to_sema_type(p, resolver))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FunctionType {
        type_parameters,
        parameters,
        return_type: convert_static_to_sema_type(&signature.return_type, resolver)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Address;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn location() -> Location {
        Location::Address {
            address: Address::from_u64(1),
            name: "C".into(),
        }
    }

    /// Resolver backed by fixed declaration tables
    #[derive(Default)]
    struct TableResolver {
        interfaces: HashMap<String, Arc<InterfaceType>>,
        composites: HashMap<TypeId, Arc<CompositeType>>,
        entitlements: HashMap<TypeId, Arc<EntitlementType>>,
        maps: HashMap<TypeId, Arc<EntitlementMapType>>,
    }

    impl SemaTypeResolver for TableResolver {
        fn interface(
            &self,
            _location: Option<&Location>,
            qualified_identifier: &str,
        ) -> Result<Arc<InterfaceType>, TypeConversionError> {
            self.interfaces
                .get(qualified_identifier)
                .cloned()
                .ok_or_else(|| TypeConversionError::UnknownInterface(qualified_identifier.into()))
        }

        fn composite(
            &self,
            _location: Option<&Location>,
            _qualified_identifier: &str,
            type_id: &TypeId,
        ) -> Result<Arc<CompositeType>, TypeConversionError> {
            self.composites
                .get(type_id)
                .cloned()
                .ok_or_else(|| TypeConversionError::UnknownComposite(type_id.clone()))
        }

        fn entitlement(&self, type_id: &TypeId) -> Result<Arc<EntitlementType>, TypeConversionError> {
            self.entitlements
                .get(type_id)
                .cloned()
                .ok_or_else(|| TypeConversionError::UnknownEntitlement(type_id.clone()))
        }

        fn entitlement_map(
            &self,
            type_id: &TypeId,
        ) -> Result<Arc<EntitlementMapType>, TypeConversionError> {
            self.maps
                .get(type_id)
                .cloned()
                .ok_or_else(|| TypeConversionError::UnknownEntitlementMap(type_id.clone()))
        }
    }

    fn resolver() -> TableResolver {
        let mut resolver = TableResolver::default();
        let r = Arc::new(CompositeType {
            location: Some(location()),
            qualified_identifier: "C.R".into(),
        });
        resolver.composites.insert(r.id(), r);
        resolver.interfaces.insert(
            "C.I".into(),
            Arc::new(InterfaceType {
                location: Some(location()),
                qualified_identifier: "C.I".into(),
            }),
        );
        let e = Arc::new(EntitlementType {
            location: Some(location()),
            qualified_identifier: "C.E".into(),
        });
        resolver.entitlements.insert(e.id(), e);
        let m = Arc::new(EntitlementMapType {
            location: Some(location()),
            qualified_identifier: "C.M".into(),
        });
        resolver.maps.insert(m.id(), m);
        resolver
    }

    #[test]
    fn unauthorized_access_maps_to_unauthorized() {
        assert_eq!(
            convert_sema_access_to_static_authorization(&SemaAccess::UNAUTHORIZED).unwrap(),
            Authorization::Unauthorized
        );
    }

    #[test]
    fn non_reference_primitive_access_is_rejected() {
        let err = convert_sema_access_to_static_authorization(&SemaAccess::Primitive(
            PrimitiveAccess::SelfOnly,
        ))
        .unwrap_err();
        assert!(matches!(err, TypeConversionError::UnsupportedAccess(_)));
    }

    #[test]
    fn entitlement_set_access_keeps_kind_and_ids() {
        let e = Arc::new(EntitlementType {
            location: Some(location()),
            qualified_identifier: "C.E".into(),
        });
        let access = SemaAccess::EntitlementSet {
            entitlements: vec![e],
            set_kind: EntitlementSetKind::Disjunction,
        };
        assert_eq!(
            convert_sema_access_to_static_authorization(&access).unwrap(),
            Authorization::entitlement_set(
                [TypeId::from("A.0000000000000001.C.E")],
                EntitlementSetKind::Disjunction
            )
        );
    }

    #[test]
    fn unparameterized_capability_becomes_primitive() {
        assert_eq!(
            convert_sema_to_static_type(&SemaType::Capability(None)).unwrap(),
            StaticType::Primitive(PrimitiveStaticType::Capability)
        );
    }

    #[test]
    fn static_to_sema_and_back() {
        let resolver = resolver();
        let original = StaticType::dictionary(
            PrimitiveStaticType::String.into(),
            StaticType::capability(Some(StaticType::reference(
                Authorization::entitlement_set(
                    [TypeId::from("A.0000000000000001.C.E")],
                    EntitlementSetKind::Conjunction,
                ),
                StaticType::Intersection(IntersectionStaticType::new(vec![
                    InterfaceStaticType::new(Some(location()), "C.I"),
                ])),
            ))),
        );

        let sema = convert_static_to_sema_type(&original, &resolver).unwrap();
        let back = convert_sema_to_static_type(&sema).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn composite_and_map_resolve_through_resolver() {
        let resolver = resolver();
        let composite = StaticType::composite(Some(location()), "C.R");
        let reference = StaticType::reference(
            Authorization::entitlement_map("A.0000000000000001.C.M"),
            composite,
        );
        let sema = convert_static_to_sema_type(&reference, &resolver).unwrap();
        assert_eq!(convert_sema_to_static_type(&sema).unwrap(), reference);
    }

    #[test]
    fn unknown_entitlement_is_an_error() {
        let resolver = resolver();
        let reference = StaticType::reference(
            Authorization::entitlement_set([TypeId::from("Nope")], EntitlementSetKind::Conjunction),
            PrimitiveStaticType::Int.into(),
        );
        let err = convert_static_to_sema_type(&reference, &resolver).unwrap_err();
        assert!(matches!(err, TypeConversionError::UnknownEntitlement(_)));
    }
}
