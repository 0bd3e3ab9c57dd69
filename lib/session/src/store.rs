//! Session store: the single source of truth for "who is logged in".
//!
//! One `SessionStore` exists per process. It is constructed explicitly and
//! handed to the view layer; there is no ambient global. The store owns the
//! session state and is its only mutator; consumers (the access gate, API
//! clients) only read snapshots.
//!
//! State synchronization is push-based: [`SessionStore::initialize`] drains
//! the identity provider's change subscription on a dedicated task. Each
//! change is fully processed (profile resolved, state updated) before the
//! next queued change begins, so a slow resolution for an old identity can
//! never overwrite a newer one.

use crate::error::SessionError;
use crate::principal::{Principal, Role};
use crate::profile::{ProfilePatch, ProfileRecord, ProfileStore};
use crate::provider::{AuthStateChange, BearerToken, ExternalIdentity, IdentityProvider};
use documerge_core::Result;
use rootcause::prelude::Report;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Whether the provider's initial auth state has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for the provider to report its initial state.
    Pending,
    /// Initial state resolved; the session reflects the provider.
    Ready,
}

/// Snapshot of the process-wide session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    principal: Option<Principal>,
    status: SessionStatus,
    last_error: Option<SessionError>,
}

impl SessionState {
    fn pending() -> Self {
        Self {
            principal: None,
            status: SessionStatus::Pending,
            last_error: None,
        }
    }

    /// Returns the authenticated principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns the session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the error from the most recent auth operation, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Returns true once the initial provider state has resolved.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == SessionStatus::Ready
    }
}

/// Handle for the provider-change listener.
///
/// Cancels the listener task when shut down or dropped. Intended for
/// application teardown only; the listener runs for the lifetime of the
/// session otherwise.
#[derive(Debug)]
pub struct ListenerHandle {
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Stops the listener. The subscription is deregistered when the task's
    /// receiver is dropped.
    pub fn shutdown(self) {
        self.task.abort();
    }

    /// Returns true if the listener task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Inner<P, S> {
    provider: P,
    profiles: S,
    state: RwLock<SessionState>,
    // Serializes profile resolutions so two concurrent first logins for the
    // same identity cannot both attempt the create.
    resolve_lock: Mutex<()>,
}

/// The session store.
///
/// Cheaply cloneable; all clones share the same session state.
pub struct SessionStore<P, S> {
    inner: Arc<Inner<P, S>>,
}

impl<P, S> Clone for SessionStore<P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, S> SessionStore<P, S>
where
    P: IdentityProvider + 'static,
    S: ProfileStore + 'static,
{
    /// Creates a session store in `Pending` status.
    ///
    /// The store stays pending until [`initialize`](Self::initialize) is
    /// called and the provider reports its initial state.
    #[must_use]
    pub fn new(provider: P, profiles: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                profiles,
                state: RwLock::new(SessionState::pending()),
                resolve_lock: Mutex::new(()),
            }),
        }
    }

    /// Registers with the identity provider and starts the listener task.
    ///
    /// The returned handle cancels the listener; release it only at
    /// application teardown. Provider changes are processed strictly in
    /// emission order, one at a time.
    pub fn initialize(&self) -> ListenerHandle {
        let mut changes = self.inner.provider.subscribe();
        let store = self.clone();
        let task = tokio::spawn(async move {
            while let Some(change) = changes.recv().await {
                store.apply_change(change).await;
            }
            debug!("auth-state subscription closed");
        });
        ListenerHandle { task }
    }

    /// Returns a snapshot of the current session state.
    pub async fn state(&self) -> SessionState {
        self.inner.state.read().await.clone()
    }

    /// Returns the current principal, if any.
    pub async fn principal(&self) -> Option<Principal> {
        self.inner.state.read().await.principal.clone()
    }

    /// Returns the current session status.
    pub async fn status(&self) -> SessionStatus {
        self.inner.state.read().await.status
    }

    /// Returns the most recent auth error, if any.
    pub async fn last_error(&self) -> Option<SessionError> {
        self.inner.state.read().await.last_error.clone()
    }

    /// Signs in with email and password.
    ///
    /// The store's principal is not updated here: the provider confirms the
    /// identity change through the subscription, and the listener resolves
    /// the full principal from the profile store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` when the provider rejects the attempt;
    /// the error is also recorded in `last_error` and the principal is left
    /// untouched.
    #[instrument(skip(self, credential))]
    pub async fn login(&self, email: &str, credential: &str) -> Result<(), SessionError> {
        match self.inner.provider.sign_in(email, credential).await {
            Ok(identity) => {
                debug!(user = %identity.id, "sign-in accepted");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::from(e);
                warn!(error = %err, "sign-in rejected");
                self.record_error(err.clone()).await;
                Err(err.into())
            }
        }
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns `EmailInUse` for duplicate registrations; other provider
    /// failures surface as `Provider`.
    #[instrument(skip(self, credential))]
    pub async fn register(&self, email: &str, credential: &str) -> Result<(), SessionError> {
        match self.inner.provider.sign_up(email, credential).await {
            Ok(identity) => {
                debug!(user = %identity.id, "account registered");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::from(e);
                warn!(error = %err, "registration rejected");
                self.record_error(err.clone()).await;
                Err(err.into())
            }
        }
    }

    /// Signs out.
    ///
    /// Requests provider sign-out, then clears the local principal without
    /// waiting for the provider's confirmation. Idempotent: signing out with
    /// no active principal is a no-op.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.inner.provider.sign_out().await {
            // Local reset is unconditional; the provider event, if it ever
            // arrives, will only confirm the signed-out state.
            warn!(error = %e, "provider sign-out failed, clearing local session anyway");
        }
        let mut state = self.inner.state.write().await;
        state.principal = None;
        state.status = SessionStatus::Ready;
    }

    /// Returns a bearer token for the active principal.
    ///
    /// Single attempt, no retry; retry policy belongs to the downstream API
    /// client.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePrincipal` when no one is signed in.
    #[instrument(skip(self))]
    pub async fn token(&self) -> Result<BearerToken, SessionError> {
        if self.inner.state.read().await.principal.is_none() {
            let err = SessionError::NoActivePrincipal;
            self.record_error(err.clone()).await;
            return Err(err.into());
        }
        match self.inner.provider.current_token().await {
            Ok(token) => Ok(token),
            Err(e) => {
                let err = SessionError::from(e);
                self.record_error(err.clone()).await;
                Err(err.into())
            }
        }
    }

    /// Resolves the full principal for an externally confirmed identity.
    ///
    /// Contract:
    /// - no stored profile: create the first-login default (Writer, active)
    ///   and return it;
    /// - stored profile missing `role` or `is_active`: merge the defaults
    ///   into the store, then return the corrected profile;
    /// - complete profile: return it verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStore` when the backing store fails; the caller must
    /// not expose a partial principal in that case.
    pub async fn resolve_principal(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<Principal, SessionError> {
        self.resolve(identity).await.map_err(Report::from)
    }

    async fn resolve(
        &self,
        identity: &ExternalIdentity,
    ) -> std::result::Result<Principal, SessionError> {
        let _guard = self.inner.resolve_lock.lock().await;

        let record = match self.inner.profiles.get(&identity.id).await? {
            None => {
                debug!(user = %identity.id, "no profile, creating first-login default");
                let record = ProfileRecord::first_login(
                    identity.email.clone(),
                    identity.display_name.clone(),
                );
                // Create-if-absent: if another resolution won the race, the
                // store hands back the existing record.
                self.inner.profiles.create(&identity.id, record).await?
            }
            Some(record) if !record.is_complete() => {
                debug!(
                    user = %identity.id,
                    has_role = record.role.is_some(),
                    has_active = record.is_active.is_some(),
                    "backfilling incomplete profile"
                );
                let mut patch = ProfilePatch::stamped()
                    .with_role(record.role.unwrap_or(Role::Writer))
                    .with_active(record.is_active.unwrap_or(true));
                if record.display_name.is_none() {
                    if let Some(name) = &identity.display_name {
                        patch = patch.with_display_name(name.clone());
                    }
                }
                self.inner.profiles.merge(&identity.id, patch.clone()).await?;
                patch.apply(record)
            }
            Some(record) => record,
        };

        Ok(Principal::new(
            identity.id.clone(),
            record.email,
            record.display_name,
            record.role.unwrap_or(Role::Writer),
            record.is_active.unwrap_or(true),
            record.two_factor_enabled.unwrap_or(false),
        ))
    }

    async fn apply_change(&self, change: AuthStateChange) {
        match change {
            AuthStateChange::SignedOut => {
                debug!("provider reports signed out");
                let mut state = self.inner.state.write().await;
                state.principal = None;
                state.status = SessionStatus::Ready;
            }
            AuthStateChange::SignedIn(identity) => match self.resolve(&identity).await {
                Ok(principal) => {
                    debug!(user = %principal.id(), role = %principal.role(), "principal resolved");
                    let mut state = self.inner.state.write().await;
                    state.principal = Some(principal);
                    state.status = SessionStatus::Ready;
                    state.last_error = None;
                }
                Err(e) => {
                    warn!(user = %identity.id, error = %e, "profile resolution failed");
                    let mut state = self.inner.state.write().await;
                    state.principal = None;
                    state.status = SessionStatus::Ready;
                    state.last_error = Some(e);
                }
            },
        }
    }

    async fn record_error(&self, err: SessionError) {
        self.inner.state.write().await.last_error = Some(err);
    }
}
