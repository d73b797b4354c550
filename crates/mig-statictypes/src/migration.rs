//! Static type rewriting migration
//!
//! Rewrites the static types embedded in type-shaped leaves: type values,
//! capabilities, legacy path capabilities and links, and capability
//! controllers.
//!
//! [`StaticTypeMigration::convert`] returns `Ok(None)` when nothing below the
//! given type changed. A wrapper type is rebuilt only around a changed part,
//! with one exception: intersections with two or more members are always
//! rebuilt, so they get re-persisted in the current encoding.

use crate::canonical::{convert_primitive, is_account_reference_type};
use crate::error::ConversionError;
use mig_core::{Migration, StorageKey, StorageMapKey, ValueMigrationError};
use mig_types::{
    CompositeStaticType, InterfaceStaticType, IntersectionStaticType, ReferenceStaticType,
    StaticType,
};
use mig_values::{
    AccountCapabilityControllerValue, CapabilityValue, PathCapabilityValue, PathLinkValue,
    StorageCapabilityControllerValue, TypeValue, Value,
};
use std::fmt;
use tracing::{debug, trace};

/// Replacement for a composite type, `None` to keep it
pub type CompositeTypeConverter = Box<dyn Fn(&CompositeStaticType) -> Option<StaticType>>;

/// Replacement for an interface type, `None` to keep it
pub type InterfaceTypeConverter = Box<dyn Fn(&InterfaceStaticType) -> Option<StaticType>>;

/// Rewrites legacy account types and, through optional converters,
/// user-defined nominal types
#[derive(Default)]
pub struct StaticTypeMigration {
    composite_type_converter: Option<CompositeTypeConverter>,
    interface_type_converter: Option<InterfaceTypeConverter>,
}

impl StaticTypeMigration {
    /// Name reported for every replacement
    pub const NAME: &'static str = "StaticTypeMigration";

    /// Create migration without converters
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With composite type converter
    #[must_use]
    pub fn with_composite_type_converter(
        mut self,
        converter: impl Fn(&CompositeStaticType) -> Option<StaticType> + 'static,
    ) -> Self {
        self.composite_type_converter = Some(Box::new(converter));
        self
    }

    /// With interface type converter
    #[must_use]
    pub fn with_interface_type_converter(
        mut self,
        converter: impl Fn(&InterfaceStaticType) -> Option<StaticType> + 'static,
    ) -> Self {
        self.interface_type_converter = Some(Box::new(converter));
        self
    }

    /// Convert `static_type`, `None` if nothing changed
    ///
    /// # Errors
    /// Returns [`ConversionError::NonInterfaceReplacement`] if the interface
    /// converter replaces an intersection member with a non-interface type
    pub fn convert(&self, static_type: &StaticType) -> Result<Option<StaticType>, ConversionError> {
        Ok(match static_type {
            StaticType::ConstantSized(array) => self
                .convert(&array.element)?
                .map(|element| StaticType::constant_sized(element, array.size)),

            StaticType::VariableSized(array) => {
                self.convert(&array.element)?.map(StaticType::variable_sized)
            }

            StaticType::Dictionary(dictionary) => {
                let key = self.convert(&dictionary.key)?;
                let value = self.convert(&dictionary.value)?;
                match (key, value) {
                    (None, None) => None,
                    (key, value) => Some(StaticType::dictionary(
                        key.unwrap_or_else(|| (*dictionary.key).clone()),
                        value.unwrap_or_else(|| (*dictionary.value).clone()),
                    )),
                }
            }

            StaticType::Capability(capability) => match &capability.borrow_type {
                Some(borrow_type) => self
                    .convert(borrow_type)?
                    .map(|borrow_type| StaticType::capability(Some(borrow_type))),
                None => None,
            },

            StaticType::Intersection(intersection) => {
                self.convert_intersection(static_type, intersection)?
            }

            StaticType::Optional(optional) => {
                self.convert(&optional.inner)?.map(StaticType::optional)
            }

            StaticType::Reference(reference) => {
                self.convert(&reference.referenced_type)?.map(|referenced| {
                    // never a reference to a reference
                    if is_account_reference_type(&referenced) {
                        referenced
                    } else {
                        StaticType::reference(reference.authorization.clone(), referenced)
                    }
                })
            }

            // not storable
            StaticType::Function(_) => None,

            StaticType::Composite(composite) => self
                .composite_type_converter
                .as_ref()
                .and_then(|convert| convert(composite)),

            StaticType::Interface(interface) => self
                .interface_type_converter
                .as_ref()
                .and_then(|convert| convert(interface)),

            StaticType::Primitive(primitive) => convert_primitive(*primitive),
        })
    }

    fn convert_intersection(
        &self,
        static_type: &StaticType,
        intersection: &IntersectionStaticType,
    ) -> Result<Option<StaticType>, ConversionError> {
        let mut converted_types = Vec::with_capacity(intersection.types.len());
        let mut any_converted = false;

        for interface in &intersection.types {
            let replacement = match self.convert(&StaticType::Interface(interface.clone()))? {
                Some(StaticType::Interface(replacement)) => {
                    any_converted = true;
                    replacement
                }
                Some(other) => {
                    debug!(%interface, replacement = %other, "non-interface intersection member");
                    return Err(ConversionError::NonInterfaceReplacement {
                        intersection: static_type.clone(),
                        original: interface.clone(),
                        replacement: other,
                    });
                }
                None => interface.clone(),
            };
            if !converted_types.contains(&replacement) {
                converted_types.push(replacement);
            }
        }

        let converted_legacy_type = match &intersection.legacy_type {
            Some(legacy_type) => self.convert(legacy_type)?,
            None => None,
        };

        if intersection.types.len() < 2 && !any_converted && converted_legacy_type.is_none() {
            return Ok(None);
        }

        let rebuilt = IntersectionStaticType {
            types: converted_types,
            legacy_type: converted_legacy_type
                .map(Box::new)
                .or_else(|| intersection.legacy_type.clone()),
        };
        Ok(Some(StaticType::Intersection(rebuilt)))
    }

    fn convert_controller_borrow_type(
        &self,
        borrow_type: &ReferenceStaticType,
    ) -> Result<Option<ReferenceStaticType>, ValueMigrationError> {
        match self.convert(&StaticType::Reference(borrow_type.clone()))? {
            Some(StaticType::Reference(converted)) => Ok(Some(converted)),
            Some(other) => Err(ValueMigrationError::InvalidBorrowType(format!(
                "controller borrow type {borrow_type} converted to non-reference {other}"
            ))),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for StaticTypeMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTypeMigration")
            .field("composite_type_converter", &self.composite_type_converter.is_some())
            .field("interface_type_converter", &self.interface_type_converter.is_some())
            .finish()
    }
}

impl Migration for StaticTypeMigration {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn migrate(
        &self,
        storage_key: &StorageKey,
        storage_map_key: &StorageMapKey,
        value: &Value,
    ) -> Result<Option<Value>, ValueMigrationError> {
        let migrated = match value {
            Value::Type(TypeValue {
                static_type: Some(static_type),
            }) => self.convert(static_type)?.map(Value::type_value),

            Value::Capability(capability) => self.convert(&capability.borrow_type)?.map(|borrow_type| {
                Value::Capability(CapabilityValue {
                    borrow_type,
                    ..capability.clone()
                })
            }),

            Value::PathCapability(capability) => match &capability.borrow_type {
                Some(borrow_type) => self.convert(borrow_type)?.map(|borrow_type| {
                    Value::PathCapability(PathCapabilityValue {
                        borrow_type: Some(borrow_type),
                        ..capability.clone()
                    })
                }),
                None => None,
            },

            Value::PathLink(link) => self.convert(&link.borrow_type)?.map(|borrow_type| {
                Value::PathLink(PathLinkValue {
                    borrow_type,
                    target_path: link.target_path.clone(),
                })
            }),

            Value::AccountCapabilityController(controller) => self
                .convert_controller_borrow_type(&controller.borrow_type)?
                .map(|borrow_type| {
                    Value::AccountCapabilityController(AccountCapabilityControllerValue {
                        borrow_type,
                        capability_id: controller.capability_id,
                    })
                }),

            Value::StorageCapabilityController(controller) => self
                .convert_controller_borrow_type(&controller.borrow_type)?
                .map(|borrow_type| {
                    Value::StorageCapabilityController(StorageCapabilityControllerValue {
                        borrow_type,
                        capability_id: controller.capability_id,
                        target_path: controller.target_path.clone(),
                    })
                }),

            _ => None,
        };

        if migrated.is_some() {
            trace!(
                %storage_key,
                key = %storage_map_key,
                kind = value.kind(),
                "static type rewritten"
            );
        }
        Ok(migrated)
    }
}
