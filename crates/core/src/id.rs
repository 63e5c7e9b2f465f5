//! Opaque server-assigned identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of an API resource.
///
/// The server treats GUIDs as opaque strings; so do we. No format is assumed
/// beyond "non-empty once persisted".
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The empty identifier of a value not yet created on the server.
    pub fn unassigned() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for Guid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Guid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Guid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_guid_is_empty() {
        assert!(Guid::unassigned().is_empty());
        assert_eq!(Guid::unassigned(), Guid::default());
        assert!(!Guid::from("route-1-guid").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let guid = Guid::new("my-domain-guid");
        assert_eq!(serde_json::to_string(&guid).unwrap(), "\"my-domain-guid\"");
        assert_eq!(guid.to_string(), "my-domain-guid");
    }
}
