//! Capability-based access gate for DocuMerge protected views.
//!
//! The gate is a pure decision function over the current principal and a
//! view's declared required capability. It performs no I/O and holds no
//! state; the view layer acts on the decision (navigate to login, render an
//! access-denied notice, or render the view).
//!
//! # Example
//!
//! ```
//! use documerge_access::{AccessDecision, AccessGate, Capability};
//! use documerge_core::ExternalId;
//! use documerge_session::{Principal, Role};
//!
//! let gate = AccessGate::require(Capability::Admin);
//!
//! let admin = Principal::new(
//!     ExternalId::new("uid_1"),
//!     "chief@example.com".to_string(),
//!     None,
//!     Role::Admin,
//!     true,
//!     false,
//! );
//!
//! assert_eq!(gate.evaluate(Some(&admin)), AccessDecision::Allow);
//! assert_eq!(gate.evaluate(None), AccessDecision::RedirectToLogin);
//! ```

pub mod gate;

pub use gate::{AccessDecision, AccessGate, Capability, evaluate};
