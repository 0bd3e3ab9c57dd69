//! Profile store boundary.
//!
//! Profiles are the persistent per-user records holding role and status,
//! keyed by the identity provider's external ID. The store predates this
//! core, so `role` and `is_active` are optional on the stored form: older
//! records were written before those fields existed. All defaulting for
//! such records happens in the session store's profile resolution, nowhere
//! else.

use crate::principal::Role;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use documerge_core::ExternalId;
use serde::{Deserialize, Serialize};

/// A user profile as held by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Login email.
    pub email: String,
    /// Human-readable name, if set.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Office role. Absent on records written before roles existed.
    #[serde(default)]
    pub role: Option<Role>,
    /// Active flag. Absent on records written before deactivation existed.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Whether two-factor authentication is enabled.
    #[serde(default)]
    pub two_factor_enabled: Option<bool>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Creates the default profile written on a user's first login.
    #[must_use]
    pub fn first_login(email: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            email,
            display_name,
            role: Some(Role::Writer),
            is_active: Some(true),
            two_factor_enabled: Some(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if every authorization-relevant field is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.role.is_some() && self.is_active.is_some()
    }
}

/// Partial profile update applied via [`ProfileStore::merge`].
///
/// `None` fields are left untouched in the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New role, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// New active flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New display name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Update timestamp. Always stamped by callers.
    pub updated_at: DateTime<Utc>,
}

impl ProfilePatch {
    /// Creates an empty patch stamped with the current time.
    #[must_use]
    pub fn stamped() -> Self {
        Self {
            updated_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: String) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// Applies this patch to a record, returning the merged record.
    #[must_use]
    pub fn apply(&self, mut record: ProfileRecord) -> ProfileRecord {
        if let Some(role) = self.role {
            record.role = Some(role);
        }
        if let Some(is_active) = self.is_active {
            record.is_active = Some(is_active);
        }
        if let Some(display_name) = &self.display_name {
            record.display_name = Some(display_name.clone());
        }
        record.updated_at = self.updated_at;
        record
    }
}

/// Errors from profile store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStoreError {
    /// The backing store could not be reached.
    Unavailable { details: String },
    /// A read completed but the record could not be interpreted.
    ReadFailed { details: String },
    /// A write was rejected by the backing store.
    WriteFailed { details: String },
    /// No profile exists for the given ID.
    NotFound { id: ExternalId },
}

impl std::fmt::Display for ProfileStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "profile store unavailable: {details}")
            }
            Self::ReadFailed { details } => write!(f, "profile read failed: {details}"),
            Self::WriteFailed { details } => write!(f, "profile write failed: {details}"),
            Self::NotFound { id } => write!(f, "no profile for id: {id}"),
        }
    }
}

impl std::error::Error for ProfileStoreError {}

/// Trait for the persistent profile store, keyed by external ID.
///
/// Implementations back onto the office's document database; tests use an
/// in-memory map.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches a profile, or `None` if the user has no record yet.
    async fn get(&self, id: &ExternalId) -> Result<Option<ProfileRecord>, ProfileStoreError>;

    /// Creates a profile if none exists for `id`.
    ///
    /// This is create-if-absent: when a record already exists (for example
    /// because a concurrent resolution won the race), the existing record is
    /// returned unchanged and no write occurs. At most one create happens
    /// per ID.
    async fn create(
        &self,
        id: &ExternalId,
        record: ProfileRecord,
    ) -> Result<ProfileRecord, ProfileStoreError>;

    /// Merges a partial update into an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileStoreError::NotFound`] if no record exists for `id`.
    async fn merge(&self, id: &ExternalId, patch: ProfilePatch) -> Result<(), ProfileStoreError>;

    /// Lists all profiles with their IDs.
    async fn list(&self) -> Result<Vec<(ExternalId, ProfileRecord)>, ProfileStoreError>;
}
