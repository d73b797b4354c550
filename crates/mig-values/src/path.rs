//! Storage paths and domains

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Storage domain a path points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDomain {
    /// `/storage/...`
    Storage,
    /// `/private/...`
    Private,
    /// `/public/...`
    Public,
}

impl PathDomain {
    /// Every path domain, in enumeration order
    pub const ALL: [Self; 3] = [Self::Storage, Self::Private, Self::Public];

    /// Domain identifier as written in paths
    #[inline]
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl Display for PathDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Unknown domain identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path domain: {0}")]
pub struct UnknownPathDomain(pub String);

impl FromStr for PathDomain {
    type Err = UnknownPathDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.identifier() == s)
            .ok_or_else(|| UnknownPathDomain(s.to_string()))
    }
}

/// `/<domain>/<identifier>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathValue {
    /// Domain
    pub domain: PathDomain,
    /// Identifier within the domain
    pub identifier: String,
}

impl PathValue {
    /// Create path
    #[inline]
    #[must_use]
    pub fn new(domain: PathDomain, identifier: impl Into<String>) -> Self {
        Self {
            domain,
            identifier: identifier.into(),
        }
    }
}

impl Display for PathValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.domain, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_round_trips_through_identifier() {
        for domain in PathDomain::ALL {
            assert_eq!(domain.identifier().parse::<PathDomain>().unwrap(), domain);
        }
        assert!("temp".parse::<PathDomain>().is_err());
    }

    #[test]
    fn path_display() {
        let path = PathValue::new(PathDomain::Public, "flowTokenReceiver");
        assert_eq!(path.to_string(), "/public/flowTokenReceiver");
    }
}
