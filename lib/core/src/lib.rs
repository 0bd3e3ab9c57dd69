//! Core domain types and utilities for DocuMerge.
//!
//! This crate provides the foundational types and error handling shared by
//! the DocuMerge session and access-control crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::ExternalId;
