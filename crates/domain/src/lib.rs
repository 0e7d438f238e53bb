//! # PeopleGraph Domain
//!
//! Domain types for the HR directory to identity-graph sync.
//!
//! This crate contains:
//! - HR record types as returned by the Zoho People forms API
//! - Graph model (resources, entitlements, grants, annotations)
//! - Domain error types and Result definitions
//! - Connector configuration and constants
//!
//! ## Architecture
//! - Depends only on `peoplegraph-common` for error classification
//! - No I/O, pure data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
