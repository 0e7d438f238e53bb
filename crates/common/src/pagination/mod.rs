//! Opaque pagination state shared between listing calls.
//!
//! A listing call receives a [`PageToken`] from the host engine, decodes it
//! into a [`Bag`], reads and advances the current [`PageState`], and hands the
//! re-encoded bag back as its continuation token. The bag is a stack so that
//! several resource-kind phases can share a single token string.

mod bag;

pub use bag::{Bag, PageState};

/// Pagination request passed in by the host engine.
///
/// `size` is the page size the caller asked for (zero means "use the default")
/// and `token` is the continuation token returned by the previous call, or an
/// empty string on the first call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageToken {
    /// Requested page size
    pub size: u32,
    /// Opaque continuation token
    pub token: String,
}

impl PageToken {
    /// Create a token for the first page with the given size
    #[must_use]
    pub fn first(size: u32) -> Self {
        Self { size, token: String::new() }
    }

    /// Create a token continuing from a previous continuation string
    #[must_use]
    pub fn new(size: u32, token: impl Into<String>) -> Self {
        Self { size, token: token.into() }
    }

    /// True when this is a request for the first page
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.token.is_empty()
    }
}
