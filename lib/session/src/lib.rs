//! Session management and identity synchronization for DocuMerge.
//!
//! This crate provides:
//! - The session store (`SessionStore`): single source of truth for the
//!   authenticated principal, synchronized with the identity provider
//! - Principal and role domain types (`Principal`, `Role`)
//! - The identity-provider and profile-store boundaries
//!   (`IdentityProvider`, `ProfileStore`)
//! - Profile administration (`ProfileAdmin`)
//!
//! # Session Model
//!
//! One session exists per process, for the lifetime of the application. It
//! starts `Pending`, becomes `Ready` once the provider's initial state
//! resolves (restored session or none), and is updated thereafter by
//! explicit login/logout calls and by provider-pushed changes. The store is
//! the session's only mutator; everything else reads snapshots.
//!
//! Role and active-status defaulting happens in exactly one place, the
//! store's profile resolution: no other component invents defaults.
//!
//! # Example
//!
//! ```no_run
//! # use documerge_session::{IdentityProvider, ProfileStore, SessionStore};
//! # async fn example<P, S>(provider: P, profiles: S)
//! # where P: IdentityProvider + 'static, S: ProfileStore + 'static {
//! let store = SessionStore::new(provider, profiles);
//! let listener = store.initialize();
//!
//! if let Err(e) = store.login("alice@example.com", "s3cret").await {
//!     eprintln!("login failed: {e}");
//! }
//!
//! // At teardown:
//! listener.shutdown();
//! # }
//! ```

pub mod admin;
pub mod error;
pub mod principal;
pub mod profile;
pub mod provider;
pub mod store;

// Re-export main types at crate root
pub use admin::ProfileAdmin;
pub use error::SessionError;
pub use principal::{Principal, Role};
pub use profile::{ProfilePatch, ProfileRecord, ProfileStore, ProfileStoreError};
pub use provider::{
    AuthStateChange, BearerToken, ExternalIdentity, IdentityError, IdentityProvider,
};
pub use store::{ListenerHandle, SessionState, SessionStatus, SessionStore};
