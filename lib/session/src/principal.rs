//! Principal domain type and role enumeration.
//!
//! A `Principal` is an authenticated user together with the authorization
//! attributes the rest of the application gates on. Principals are only
//! produced by the session store's profile resolution, which guarantees
//! that `role` and `is_active` are always concrete values.

use documerge_core::ExternalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Office role assigned to a user.
///
/// The serialized names match the records the profile store already holds,
/// so legacy documents deserialize without migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Drafting lawyer: works on their own petitions and documents.
    #[serde(rename = "advogado_redator")]
    Writer,
    /// Administrating lawyer: manages users and office-wide content.
    #[serde(rename = "advogado_administrador")]
    Admin,
    /// Developer: unrestricted access for platform maintenance.
    #[serde(rename = "dev")]
    Developer,
}

impl Role {
    /// Returns the stored/wire name for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Writer => "advogado_redator",
            Self::Admin => "advogado_administrador",
            Self::Developer => "dev",
        }
    }

    /// Returns true if this role carries administrative privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Developer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated user with resolved authorization attributes.
///
/// Unlike [`ProfileRecord`](crate::profile::ProfileRecord), every field that
/// authorization depends on is present: the session store backfills defaults
/// for incomplete stored profiles before constructing a `Principal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-issued stable identifier.
    id: ExternalId,
    /// Login email, unique per user.
    email: String,
    /// Human-readable name, if the user set one.
    display_name: Option<String>,
    /// Office role.
    role: Role,
    /// Inactive principals are denied all gated capabilities.
    is_active: bool,
    /// Whether two-factor authentication is enabled. Informational only.
    two_factor_enabled: bool,
}

impl Principal {
    /// Creates a principal with all authorization attributes resolved.
    #[must_use]
    pub fn new(
        id: ExternalId,
        email: String,
        display_name: Option<String>,
        role: Role,
        is_active: bool,
        two_factor_enabled: bool,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            role,
            is_active,
            two_factor_enabled,
        }
    }

    /// Returns the provider-issued identifier.
    #[must_use]
    pub fn id(&self) -> &ExternalId {
        &self.id
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name, if set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the office role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the principal is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether two-factor authentication is enabled.
    #[must_use]
    pub fn two_factor_enabled(&self) -> bool {
        self.two_factor_enabled
    }
}
