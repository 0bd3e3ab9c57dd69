//! Identifier types for DocuMerge domain entities.
//!
//! The identity provider issues the canonical user identifier, so unlike
//! internally generated IDs it is an opaque string we never parse or
//! reinterpret. Profile records and session state are keyed by it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier issued by the identity provider.
///
/// External IDs are treated as black boxes: they are compared, hashed, and
/// used as profile-store keys, but their internal structure belongs to the
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates an external ID from a provider-issued string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExternalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
