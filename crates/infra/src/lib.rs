//! # PeopleGraph Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client wrapper (timeouts, default headers, attempt budget)
//! - Zoho People integration (token sources, forms API client)
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `peoplegraph-core`
//! - Depends on `peoplegraph-common`, `peoplegraph-domain` and
//!   `peoplegraph-core`
//! - Contains all "impure" code (I/O, clocks, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::zoho::{StaticTokenProvider, ZohoPeopleClient, ZohoTokenSource};
