//! Error types for the session crate.
//!
//! Errors are designed for layered context using rootcause: operations on
//! the session store return `Report<SessionError>`, while the trait
//! boundaries ([`ProfileStoreError`](crate::profile::ProfileStoreError),
//! [`IdentityError`](crate::provider::IdentityError)) use plain enums that
//! convert into `SessionError` at the store layer.

use crate::profile::ProfileStoreError;
use crate::provider::IdentityError;
use std::fmt;

/// Errors surfaced by session store operations.
///
/// Every error is both returned to the caller and recorded in the session
/// state's `last_error` for display; no operation retries automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The identity provider rejected a login attempt. User-correctable.
    InvalidCredential { reason: String },
    /// Sign-up rejected because the email is already registered.
    EmailInUse { email: String },
    /// The profile store could not be read or written. The session keeps
    /// `principal` absent rather than exposing a partial principal.
    ProfileStore { details: String },
    /// A token was requested with no active principal. Usage error in the
    /// calling code.
    NoActivePrincipal,
    /// The identity provider failed for a non-credential reason.
    Provider { details: String },
    /// An administrative operation was attempted without the required role.
    PermissionDenied { reason: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential { reason } => {
                write!(f, "invalid credentials: {reason}")
            }
            Self::EmailInUse { email } => {
                write!(f, "email already registered: {email}")
            }
            Self::ProfileStore { details } => {
                write!(f, "profile store error: {details}")
            }
            Self::NoActivePrincipal => {
                write!(f, "no active principal")
            }
            Self::Provider { details } => {
                write!(f, "identity provider error: {details}")
            }
            Self::PermissionDenied { reason } => {
                write!(f, "permission denied: {reason}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ProfileStoreError> for SessionError {
    fn from(e: ProfileStoreError) -> Self {
        Self::ProfileStore {
            details: e.to_string(),
        }
    }
}

impl From<IdentityError> for SessionError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidCredential { reason } => Self::InvalidCredential { reason },
            IdentityError::EmailInUse { email } => Self::EmailInUse { email },
            IdentityError::Unavailable { details } => Self::Provider { details },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use documerge_core::ExternalId;

    #[test]
    fn invalid_credential_display() {
        let err = SessionError::InvalidCredential {
            reason: "wrong password".to_string(),
        };
        assert!(err.to_string().contains("invalid credentials"));
        assert!(err.to_string().contains("wrong password"));
    }

    #[test]
    fn no_active_principal_display() {
        let err = SessionError::NoActivePrincipal;
        assert!(err.to_string().contains("no active principal"));
    }

    #[test]
    fn profile_store_error_converts() {
        let err: SessionError = ProfileStoreError::Unavailable {
            details: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::ProfileStore { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn not_found_converts_to_profile_store_error() {
        let err: SessionError = ProfileStoreError::NotFound {
            id: ExternalId::new("uid_1"),
        }
        .into();
        assert!(matches!(err, SessionError::ProfileStore { .. }));
    }

    #[test]
    fn identity_error_converts_by_kind() {
        let err: SessionError = IdentityError::InvalidCredential {
            reason: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::InvalidCredential { .. }));

        let err: SessionError = IdentityError::EmailInUse {
            email: "a@example.com".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::EmailInUse { .. }));

        let err: SessionError = IdentityError::Unavailable {
            details: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::Provider { .. }));
    }
}
