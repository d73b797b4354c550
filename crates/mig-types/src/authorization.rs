//! Reference authorizations
//!
//! An [`Authorization`] qualifies what a reference may do with its target:
//! nothing beyond the public interface ([`Authorization::Unauthorized`]), the
//! entitlements of a conjunctive or disjunctive set, or whatever an
//! entitlement map produces.

use crate::common::TypeId;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Entitlement IDs granted by full account access
pub const ACCOUNT_ENTITLEMENTS: [&str; 5] = ["Storage", "Contracts", "Keys", "Inbox", "Capabilities"];

/// Conjunction of every account entitlement
pub static FULLY_ENTITLED_ACCOUNT_ACCESS: Lazy<Authorization> = Lazy::new(|| {
    Authorization::entitlement_set(
        ACCOUNT_ENTITLEMENTS.iter().copied().map(TypeId::from),
        EntitlementSetKind::Conjunction,
    )
});

/// How the entitlements of a set combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementSetKind {
    /// All entitlements are granted (`auth(A, B)`)
    Conjunction,

    /// One of the entitlements is granted (`auth(A | B)`)
    Disjunction,
}

impl EntitlementSetKind {
    /// Separator used when printing a set of this kind
    #[inline]
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Conjunction => ", ",
            Self::Disjunction => " | ",
        }
    }
}

/// Set of entitlements
///
/// Insertion order is kept for printing; equality ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementSetAuthorization {
    entitlements: IndexSet<TypeId>,
    set_kind: EntitlementSetKind,
}

impl EntitlementSetAuthorization {
    /// Create set, dropping duplicate entitlements
    #[must_use]
    pub fn new(entitlements: impl IntoIterator<Item = TypeId>, set_kind: EntitlementSetKind) -> Self {
        Self {
            entitlements: entitlements.into_iter().collect(),
            set_kind,
        }
    }

    /// Entitlements in insertion order
    #[inline]
    pub fn entitlements(&self) -> impl Iterator<Item = &TypeId> {
        self.entitlements.iter()
    }

    /// Number of distinct entitlements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entitlements.len()
    }

    /// Check if the set has no entitlements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entitlements.is_empty()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, entitlement: &TypeId) -> bool {
        self.entitlements.contains(entitlement)
    }

    /// Set kind
    #[inline]
    #[must_use]
    pub fn set_kind(&self) -> EntitlementSetKind {
        self.set_kind
    }
}

impl PartialEq for EntitlementSetAuthorization {
    fn eq(&self, other: &Self) -> bool {
        self.set_kind == other.set_kind
            && self.entitlements.len() == other.entitlements.len()
            && other.entitlements.iter().all(|e| self.entitlements.contains(e))
    }
}

impl Eq for EntitlementSetAuthorization {}

impl Hash for EntitlementSetAuthorization {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // order-independent: only kind and cardinality
        self.set_kind.hash(state);
        self.entitlements.len().hash(state);
    }
}

/// Authorization produced by an entitlement map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitlementMapAuthorization {
    /// Type ID of the entitlement map
    pub type_id: TypeId,
}

/// Access qualifier of a reference type
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Authorization {
    /// No entitlements
    #[default]
    Unauthorized,

    /// Conjunctive or disjunctive entitlement set
    EntitlementSet(EntitlementSetAuthorization),

    /// Entitlement map
    EntitlementMap(EntitlementMapAuthorization),
}

impl Authorization {
    /// Entitlement set authorization
    #[must_use]
    pub fn entitlement_set(
        entitlements: impl IntoIterator<Item = TypeId>,
        set_kind: EntitlementSetKind,
    ) -> Self {
        Self::EntitlementSet(EntitlementSetAuthorization::new(entitlements, set_kind))
    }

    /// Entitlement map authorization
    #[inline]
    #[must_use]
    pub fn entitlement_map(type_id: impl Into<TypeId>) -> Self {
        Self::EntitlementMap(EntitlementMapAuthorization {
            type_id: type_id.into(),
        })
    }
}

/// Prints the `auth(...) ` prefix of a reference type, empty when unauthorized
impl Display for Authorization {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => Ok(()),
            Self::EntitlementSet(set) => {
                f.write_str("auth(")?;
                for (i, entitlement) in set.entitlements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(set.set_kind.separator())?;
                    }
                    write!(f, "{entitlement}")?;
                }
                f.write_str(") ")
            }
            Self::EntitlementMap(map) => write!(f, "auth({}) ", map.type_id),
        }
    }
}
