//! # PeopleGraph Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the HR directory and credential source
//! - The continuation-token cursor used by every listing
//! - Record mapping from HR records to graph resources
//! - Resource syncers deriving entitlements and grants
//! - The connector facade the host engine drives
//!
//! ## Architecture Principles
//! - Only depends on `peoplegraph-common` and `peoplegraph-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod connector;
pub mod hierarchy;
pub mod mapping;
pub mod pagination;
pub mod ports;
pub mod syncers;

// Re-export specific items to avoid ambiguity
pub use connector::{ConnectorMetadata, PeopleConnector};
pub use hierarchy::DepartmentHierarchy;
pub use pagination::Cursor;
pub use ports::{AccessTokenProvider, Lookup, Page, PeopleDirectory};
pub use syncers::{DepartmentSyncer, ListPage, ResourceSyncer, RoleSyncer, UserSyncer};
