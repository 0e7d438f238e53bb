//! URL composition and page-offset arithmetic for the forms API

use peoplegraph_domain::constants::{FIRST_PAGE_INDEX, MAX_PAGE_SIZE};
use peoplegraph_domain::{PeopleGraphError, Result};
use url::Url;

use crate::errors::InfraError;

/// Mutation applied to a request URL's query string
pub type QueryMutator = Box<dyn FnOnce(&mut Url) + Send>;

/// Page size actually sent: `size` when in `1..=100`, else 100.
#[must_use]
pub fn effective_page_size(size: u32) -> u32 {
    if size == 0 || size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        size
    }
}

/// Offset of the page after the one just fetched.
///
/// An empty `previous` token always yields the first offset; a page holding
/// fewer than the effective size ends the listing with an empty token.
///
/// # Errors
/// Returns `PeopleGraphError::Pagination` when `previous` is not a number.
pub fn next_page_token(previous: &str, page_size: u32, records: usize) -> Result<String> {
    if previous.is_empty() {
        return Ok(FIRST_PAGE_INDEX.to_string());
    }

    let offset: u64 = previous.parse().map_err(|_| {
        PeopleGraphError::Pagination(format!("page offset '{previous}' is not a number"))
    })?;
    let size = effective_page_size(page_size);

    if records < size as usize {
        return Ok(String::new());
    }

    Ok((offset + u64::from(size)).to_string())
}

/// Absolute URL for `path` below `base`, with every mutator applied in order.
///
/// # Errors
/// Returns `PeopleGraphError::Config` when `base` is not a valid URL.
pub fn build_url(
    base: &str,
    path: &str,
    mutators: impl IntoIterator<Item = QueryMutator>,
) -> Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let mut url =
        Url::parse(&joined).map_err(|err| PeopleGraphError::from(InfraError::from(err)))?;

    for mutate in mutators {
        mutate(&mut url);
    }

    Ok(url)
}

/// Set `key` to `value`, replacing earlier values of the same key
pub fn with_query_param(key: impl Into<String>, value: impl Into<String>) -> QueryMutator {
    let key = key.into();
    let value = value.into();
    Box::new(move |url: &mut Url| {
        let retained: Vec<(String, String)> =
            url.query_pairs()
                .filter(|(k, _)| *k != key)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
        pairs.append_pair(&key, &value);
    })
}

/// `limit` query parameter, clamped to the effective page size
pub fn with_page_limit(page_size: u32) -> QueryMutator {
    with_query_param("limit", effective_page_size(page_size).to_string())
}

/// `sIndex` query parameter; an empty token starts at the first record
pub fn with_page_index(page_token: &str) -> QueryMutator {
    let index = if page_token.is_empty() { FIRST_PAGE_INDEX } else { page_token };
    with_query_param("sIndex", index)
}

/// `recordId` filter for single-record lookups
pub fn with_record_id(id: &str) -> QueryMutator {
    with_query_param("recordId", id)
}
