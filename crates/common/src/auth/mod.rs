//! OAuth 2.0 credential types shared by the HTTP integrations.

pub mod types;

pub use types::{TokenResponse, TokenSet};
