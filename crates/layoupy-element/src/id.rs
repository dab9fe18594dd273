//! Element identity
//!
//! Provides [`ElementId`], the opaque identifier that addresses every node of
//! a forest. Ids are issued once at creation time and never change.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an element
///
/// Backed by a v4 UUID. Immutable and cheap to copy.
/// Serialized as the hyphenated lowercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh random id
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[inline]
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Build an id from a 128-bit value
    ///
    /// Deterministic; used by sequential id sources and fixtures.
    #[inline]
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form (first 8 hex chars), for log lines
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        let mut s = self.0.simple().to_string();
        s.truncate(8);
        s
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|source| IdError::Malformed {
                value: trimmed.to_string(),
                source,
            })
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl serde::Serialize for ElementId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ElementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ElementIdVisitor;

        impl<'de> serde::de::Visitor<'de> for ElementIdVisitor {
            type Value = ElementId;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("an element id as a UUID string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(ElementIdVisitor)
    }
}

/// Errors produced when parsing an [`ElementId`]
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Empty input
    #[error("element id is empty")]
    Empty,

    /// Not a UUID
    #[error("malformed element id '{value}': {source}")]
    Malformed {
        value: String,
        #[source]
        source: uuid::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_differ() {
        let a = ElementId::generate();
        let b = ElementId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn display_and_parse() {
        let id = ElementId::generate();
        let parsed: ElementId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert!(matches!("  ".parse::<ElementId>(), Err(IdError::Empty)));
        assert!(matches!(
            "not-a-uuid".parse::<ElementId>(),
            Err(IdError::Malformed { .. })
        ));
    }

    #[test]
    fn short_form() {
        let id = ElementId::from_u128(0xabcd_ef01_0000_0000_0000_0000_0000_0000);
        assert_eq!(id.short(), "abcdef01");
    }

    #[test]
    fn serde_as_plain_string() {
        let id = ElementId::from_u128(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
        let back: ElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
