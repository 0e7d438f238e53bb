//! Rate-limit metadata carried on API response headers

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use peoplegraph_domain::{PeopleGraphError, RateLimitDescription, RateLimitStatus, Result};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;

const LIMIT_HEADERS: [&str; 2] = ["x-ratelimit-limit", "ratelimit-limit"];
const REMAINING_HEADERS: [&str; 2] = ["x-ratelimit-remaining", "ratelimit-remaining"];
const RESET_HEADERS: [&str; 2] = ["x-ratelimit-reset", "ratelimit-reset"];

/// Build a rate-limit description from response headers.
///
/// Missing headers leave their fields at zero / unset. The status is
/// `Overlimit` for a 429 response and `Ok` otherwise. Reset values are
/// seconds from now; `Retry-After` is used when no reset header is present.
///
/// # Errors
/// Returns `PeopleGraphError::RateLimit` when a present header is not a
/// non-negative integer.
pub fn extract_rate_limit(
    status: StatusCode,
    headers: &HeaderMap,
) -> Result<RateLimitDescription> {
    let limit = first_integer(headers, &LIMIT_HEADERS)?.unwrap_or(0);
    let remaining = first_integer(headers, &REMAINING_HEADERS)?.unwrap_or(0);

    let reset_seconds = match first_integer(headers, &RESET_HEADERS)? {
        Some(seconds) => Some(("reset", seconds)),
        None => first_integer(headers, &[RETRY_AFTER.as_str()])?.map(|s| ("retry-after", s)),
    };
    let reset_at = match reset_seconds {
        Some((name, seconds)) => Some(reset_time(name, seconds)?),
        None => None,
    };

    let status = if status == StatusCode::TOO_MANY_REQUESTS {
        RateLimitStatus::Overlimit
    } else {
        RateLimitStatus::Ok
    };

    Ok(RateLimitDescription { status, limit, remaining, reset_at })
}

fn reset_time(name: &str, seconds: i64) -> Result<DateTime<Utc>> {
    ChronoDuration::try_seconds(seconds)
        .and_then(|offset| Utc::now().checked_add_signed(offset))
        .ok_or_else(|| {
            PeopleGraphError::RateLimit(format!("{name} value '{seconds}' is out of range"))
        })
}

fn first_integer(headers: &HeaderMap, names: &[&str]) -> Result<Option<i64>> {
    let Some((name, value)) =
        names.iter().find_map(|name| headers.get(*name).map(|value| (*name, value)))
    else {
        return Ok(None);
    };

    let text = value.to_str().map_err(|_| {
        PeopleGraphError::RateLimit(format!("header '{name}' is not valid ASCII"))
    })?;

    match text.trim().parse::<i64>() {
        Ok(parsed) if parsed >= 0 => Ok(Some(parsed)),
        _ => Err(PeopleGraphError::RateLimit(format!(
            "header '{name}' has non-numeric value '{text}'"
        ))),
    }
}
