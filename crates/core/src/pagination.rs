//! Continuation-token cursor shared by the listing syncers.
//!
//! The host passes back whatever token the previous call returned. The cursor
//! decodes it into a [`Bag`], makes sure the caller's resource kind has a
//! state on top, exposes that state's offset, and re-encodes after advancing.

use peoplegraph_common::pagination::{Bag, PageState, PageToken};
use peoplegraph_domain::{PeopleGraphError, Result};

/// Decoded pagination state for one listing call
#[derive(Debug, Clone)]
pub struct Cursor {
    bag: Bag,
    page_token: String,
}

impl Cursor {
    /// Decode `token` for a listing of `resource_type_id`.
    ///
    /// An empty bag gets a fresh state for the kind pushed on top.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Pagination` if the token is not a valid bag
    /// or its current offset is not numeric.
    pub fn decode(token: &PageToken, resource_type_id: &str) -> Result<Self> {
        let mut bag = Bag::unmarshal(&token.token).map_err(|err| {
            PeopleGraphError::Pagination(format!("invalid continuation token: {err}"))
        })?;

        if bag.current().is_none() {
            bag.push(PageState::for_kind(resource_type_id));
        }

        let page_token = bag.current().map(|state| state.token.clone()).unwrap_or_default();
        if !page_token.is_empty() && page_token.parse::<i32>().is_err() {
            return Err(PeopleGraphError::Pagination(format!(
                "continuation offset '{page_token}' is not numeric"
            )));
        }

        Ok(Self { bag, page_token })
    }

    /// Offset to request; empty means the first page
    #[must_use]
    pub fn page_token(&self) -> &str {
        &self.page_token
    }

    /// Resource kind of the current state
    #[must_use]
    pub fn resource_type_id(&self) -> &str {
        self.bag.current().map_or("", |state| state.resource_type_id.as_str())
    }

    /// Store `next_page_token` and encode the continuation for the host.
    ///
    /// An empty `next_page_token` ends this kind's phase.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Pagination` if the bag cannot be advanced or
    /// encoded.
    pub fn advance(mut self, next_page_token: &str) -> Result<String> {
        self.bag
            .next(next_page_token)
            .map_err(|err| PeopleGraphError::Pagination(err.to_string()))?;
        self.bag.marshal().map_err(|err| PeopleGraphError::Pagination(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_starts_at_first_page() {
        let cursor = Cursor::decode(&PageToken::first(10), "user").unwrap();
        assert_eq!(cursor.page_token(), "");
        assert_eq!(cursor.resource_type_id(), "user");
    }

    #[test]
    fn advance_round_trips_offset() {
        let cursor = Cursor::decode(&PageToken::first(10), "user").unwrap();
        let next = cursor.advance("11").unwrap();

        let resumed = Cursor::decode(&PageToken::new(10, next), "user").unwrap();
        assert_eq!(resumed.page_token(), "11");
    }

    #[test]
    fn empty_next_token_ends_listing() {
        let cursor = Cursor::decode(&PageToken::first(10), "department").unwrap();
        assert_eq!(cursor.advance("").unwrap(), "");
    }

    #[test]
    fn garbage_token_is_pagination_error() {
        let err = Cursor::decode(&PageToken::new(10, "{not json"), "user").unwrap_err();
        assert!(matches!(err, PeopleGraphError::Pagination(_)));
    }

    #[test]
    fn non_numeric_offset_is_pagination_error() {
        let mut bag = Bag::new();
        bag.push(PageState { token: "eleven".into(), ..PageState::for_kind("user") });
        let token = PageToken::new(10, bag.marshal().unwrap());

        let err = Cursor::decode(&token, "user").unwrap_err();
        assert!(matches!(err, PeopleGraphError::Pagination(ref msg) if msg.contains("eleven")));
    }

    #[test]
    fn resumes_state_of_other_kind_on_top() {
        let mut bag = Bag::new();
        bag.push(PageState { token: "21".into(), ..PageState::for_kind("department") });
        let token = PageToken::new(10, bag.marshal().unwrap());

        let cursor = Cursor::decode(&token, "user").unwrap();
        assert_eq!(cursor.resource_type_id(), "department");
        assert_eq!(cursor.page_token(), "21");
    }
}
