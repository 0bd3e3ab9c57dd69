//! Profile administration.
//!
//! Backs the user-management screen: role changes, activation toggles, and
//! the developer-promotion seeding rule. Capability gating for the screen
//! itself lives in the access gate; the one rule enforced here is who may
//! promote a user to developer.

use crate::error::SessionError;
use crate::principal::{Principal, Role};
use crate::profile::{ProfilePatch, ProfileRecord, ProfileStore};
use documerge_core::{ExternalId, Result};
use rootcause::prelude::Report;
use tracing::{debug, instrument};

/// Administrative operations over the profile store.
pub struct ProfileAdmin<S> {
    profiles: S,
}

impl<S: ProfileStore> ProfileAdmin<S> {
    /// Creates a profile admin over the given store.
    #[must_use]
    pub fn new(profiles: S) -> Self {
        Self { profiles }
    }

    /// Lists all profiles, for the user-management screen.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStore` when the backing store fails.
    pub async fn profiles(&self) -> Result<Vec<(ExternalId, ProfileRecord)>, SessionError> {
        self.profiles
            .list()
            .await
            .map_err(|e| Report::from(SessionError::from(e)))
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStore` when the user has no profile or the store
    /// fails.
    #[instrument(skip(self))]
    pub async fn set_role(&self, id: &ExternalId, role: Role) -> Result<(), SessionError> {
        self.profiles
            .merge(id, ProfilePatch::stamped().with_role(role))
            .await
            .map_err(|e| Report::from(SessionError::from(e)))?;
        debug!(user = %id, role = %role, "role updated");
        Ok(())
    }

    /// Activates or deactivates a user.
    ///
    /// Deactivated users are denied all gated capabilities on their next
    /// access-gate evaluation; their session is not force-terminated here.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStore` when the user has no profile or the store
    /// fails.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: &ExternalId, is_active: bool) -> Result<(), SessionError> {
        self.profiles
            .merge(id, ProfilePatch::stamped().with_active(is_active))
            .await
            .map_err(|e| Report::from(SessionError::from(e)))?;
        debug!(user = %id, is_active, "active flag updated");
        Ok(())
    }

    /// Promotes the user with the given email to developer.
    ///
    /// Seeding rule: once any developer exists, only admins and developers
    /// may promote. Before the first developer exists, any authenticated
    /// principal may promote (bootstrap self-promotion).
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` when the rule is violated, `ProfileStore`
    /// when no profile matches the email or the store fails.
    #[instrument(skip(self, acting), fields(acting = %acting.id()))]
    pub async fn promote_to_developer(
        &self,
        acting: &Principal,
        email: &str,
    ) -> Result<(), SessionError> {
        let profiles = self
            .profiles
            .list()
            .await
            .map_err(|e| Report::from(SessionError::from(e)))?;

        let any_developer = profiles
            .iter()
            .any(|(_, record)| record.role == Some(Role::Developer));
        if any_developer && !acting.role().is_admin() {
            return Err(SessionError::PermissionDenied {
                reason: "only admins may promote once a developer exists".to_string(),
            }
            .into());
        }

        let (id, _) = profiles
            .into_iter()
            .find(|(_, record)| record.email == email)
            .ok_or_else(|| {
                Report::from(SessionError::ProfileStore {
                    details: format!("no profile with email: {email}"),
                })
            })?;

        self.set_role(&id, Role::Developer).await?;
        debug!(%email, "promoted to developer");
        Ok(())
    }
}
