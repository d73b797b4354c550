//! Replacements for legacy primitive kinds

use mig_types::{
    Authorization, PrimitiveStaticType, StaticType, FULLY_ENTITLED_ACCOUNT_ACCESS,
};
use once_cell::sync::Lazy;

/// `auth(Storage, Contracts, Keys, Inbox, Capabilities) &Account`, replaces `AuthAccount`
pub static AUTH_ACCOUNT_REFERENCE_TYPE: Lazy<StaticType> = Lazy::new(|| {
    StaticType::reference(
        FULLY_ENTITLED_ACCOUNT_ACCESS.clone(),
        PrimitiveStaticType::Account.into(),
    )
});

/// `&Account`, replaces `PublicAccount`
pub static UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE: Lazy<StaticType> = Lazy::new(|| {
    StaticType::reference(
        Authorization::Unauthorized,
        PrimitiveStaticType::Account.into(),
    )
});

/// Check if `t` is one of the two canonical account reference types
#[must_use]
pub fn is_account_reference_type(t: &StaticType) -> bool {
    *t == *AUTH_ACCOUNT_REFERENCE_TYPE || *t == *UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE
}

/// Replacement of a legacy primitive kind, `None` for current kinds
#[must_use]
pub fn convert_primitive(primitive: PrimitiveStaticType) -> Option<StaticType> {
    use PrimitiveStaticType as P;

    let replacement = match primitive {
        P::PublicAccount => return Some(UNAUTHORIZED_ACCOUNT_REFERENCE_TYPE.clone()),
        P::AuthAccount => return Some(AUTH_ACCOUNT_REFERENCE_TYPE.clone()),
        P::AccountKey => return Some(StaticType::account_key()),

        P::AuthAccountCapabilities | P::PublicAccountCapabilities => P::AccountCapabilities,
        P::AuthAccountAccountCapabilities => P::AccountAccountCapabilities,
        P::AuthAccountStorageCapabilities => P::AccountStorageCapabilities,
        P::AuthAccountContracts | P::PublicAccountContracts => P::AccountContracts,
        P::AuthAccountKeys | P::PublicAccountKeys => P::AccountKeys,
        P::AuthAccountInbox => P::AccountInbox,

        _ => return None,
    };
    Some(StaticType::Primitive(replacement))
}
