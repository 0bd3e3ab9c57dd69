//! Identity provider boundary.
//!
//! The identity provider owns authentication: it verifies credentials,
//! issues bearer tokens, and pushes auth-state changes (login elsewhere,
//! token refresh, external sign-out). This module defines the trait the
//! session store consumes; production wires it to the hosted provider,
//! tests use an in-memory fake.

use async_trait::async_trait;
use documerge_core::ExternalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Identity confirmed by the provider after authentication.
///
/// Carries only what the provider knows; role and status live in the
/// profile store and are resolved separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Provider-issued stable identifier.
    pub id: ExternalId,
    /// Verified login email.
    pub email: String,
    /// Display name registered with the provider, if any.
    pub display_name: Option<String>,
}

impl ExternalIdentity {
    /// Creates an external identity.
    #[must_use]
    pub fn new(id: ExternalId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// An auth-state change pushed by the provider.
///
/// Changes are level-triggered: each one carries the provider's full current
/// state, not a delta, so a consumer that only looks at the latest change is
/// always consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStateChange {
    /// A user is signed in (initial restore, fresh login, or token refresh).
    SignedIn(ExternalIdentity),
    /// No user is signed in.
    SignedOut,
}

/// A bearer credential for downstream API calls.
///
/// The token value is redacted from `Debug` output so it cannot leak into
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a provider-issued token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in an Authorization header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Errors from identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider rejected the supplied credentials.
    InvalidCredential { reason: String },
    /// Sign-up rejected because the email is already registered.
    EmailInUse { email: String },
    /// The provider could not be reached or failed internally.
    Unavailable { details: String },
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential { reason } => {
                write!(f, "invalid credentials: {reason}")
            }
            Self::EmailInUse { email } => {
                write!(f, "email already registered: {email}")
            }
            Self::Unavailable { details } => {
                write!(f, "identity provider unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}

/// Trait for the external identity provider.
///
/// Implementations must emit the current auth state on the subscription
/// channel immediately after `subscribe` (restored session or signed-out),
/// and again on every subsequent change, in the order changes occur.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers for auth-state changes.
    ///
    /// The receiver is the session store's sole feed of identity changes;
    /// dropping it (via the listener handle) deregisters the subscription.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthStateChange>;

    /// Verifies credentials and signs the user in.
    ///
    /// On success the provider also emits a `SignedIn` change on all
    /// subscriptions.
    async fn sign_in(
        &self,
        email: &str,
        credential: &str,
    ) -> Result<ExternalIdentity, IdentityError>;

    /// Registers a new account and signs it in.
    async fn sign_up(
        &self,
        email: &str,
        credential: &str,
    ) -> Result<ExternalIdentity, IdentityError>;

    /// Signs the current user out.
    ///
    /// On success the provider also emits a `SignedOut` change on all
    /// subscriptions.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Returns a current bearer token for the signed-in user.
    async fn current_token(&self) -> Result<BearerToken, IdentityError>;
}
