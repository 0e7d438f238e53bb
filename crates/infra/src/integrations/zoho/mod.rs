//! Zoho People integration
//!
//! - [`ZohoPeopleClient`] implements the `PeopleDirectory` port against the
//!   forms API (`/employee/*`, `/department/*`).
//! - [`ZohoTokenSource`] obtains bearer tokens from the regional accounts
//!   server; [`StaticTokenProvider`] wraps a fixed token.
//! - [`request`] holds URL composition and the page-offset rules.
//! - [`rate_limit`] turns response headers into rate-limit annotations.
//!
//! No call is retried here. A failed round trip surfaces immediately.

pub mod auth;
pub mod client;
pub mod rate_limit;
pub mod request;

pub use auth::{StaticTokenProvider, ZohoTokenSource};
pub use client::ZohoPeopleClient;
pub use rate_limit::extract_rate_limit;
pub use request::{effective_page_size, next_page_token};
