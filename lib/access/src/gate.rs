//! The render-or-redirect decision function.

use documerge_session::{Principal, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission level a protected view may require.
///
/// Serialized names match the role terms used in route configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Drafting-level access.
    #[serde(rename = "advogado_redator")]
    Writer,
    /// Administration-level access.
    #[serde(rename = "advogado_administrador")]
    Admin,
    /// Platform-maintenance access.
    #[serde(rename = "dev")]
    Developer,
}

impl Capability {
    /// Returns the wire name for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Writer => "advogado_redator",
            Self::Admin => "advogado_administrador",
            Self::Developer => "dev",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of evaluating a principal against a view's requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the view.
    Allow,
    /// No identity; navigate to the login view.
    RedirectToLogin,
    /// Authenticated but not permitted; render the access-denied notice.
    Forbidden,
}

/// Decides whether a principal may access a view.
///
/// Total and deterministic over the full input domain. Rules:
/// - absent principal: redirect to login, regardless of the requirement;
/// - no required capability: allow any authenticated principal. This
///   intentionally skips the active-status check, mirroring the shipped
///   behavior for unguarded routes; inactive users can still reach views
///   that require nothing;
/// - otherwise: inactive principals are forbidden whatever their role;
///   developers hold every capability; admins hold `Admin` and `Writer`;
///   writers hold only `Writer`.
#[must_use]
pub fn evaluate(principal: Option<&Principal>, required: Option<Capability>) -> AccessDecision {
    let Some(principal) = principal else {
        return AccessDecision::RedirectToLogin;
    };
    let Some(required) = required else {
        return AccessDecision::Allow;
    };

    if !principal.is_active() {
        return AccessDecision::Forbidden;
    }

    let allowed = match principal.role() {
        Role::Developer => true,
        Role::Admin => matches!(required, Capability::Admin | Capability::Writer),
        Role::Writer => required == Capability::Writer,
    };

    if allowed {
        AccessDecision::Allow
    } else {
        AccessDecision::Forbidden
    }
}

/// A view's declared access requirement.
///
/// Carried by route definitions; the view layer evaluates it against the
/// current principal on each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGate {
    /// Required capability, or `None` for any authenticated principal.
    required: Option<Capability>,
}

impl AccessGate {
    /// Gate that admits any authenticated principal.
    #[must_use]
    pub fn authenticated() -> Self {
        Self { required: None }
    }

    /// Gate that requires the given capability.
    #[must_use]
    pub fn require(capability: Capability) -> Self {
        Self {
            required: Some(capability),
        }
    }

    /// Returns the required capability, if any.
    #[must_use]
    pub fn required(&self) -> Option<Capability> {
        self.required
    }

    /// Evaluates this gate against the current principal.
    #[must_use]
    pub fn evaluate(&self, principal: Option<&Principal>) -> AccessDecision {
        evaluate(principal, self.required)
    }
}
