use crate::err::StreamError;
use headers::{HeaderMapExt, IfModifiedSince, IfUnmodifiedSince, LastModified};
use hyper::header::{HeaderMap, IF_NONE_MATCH, IF_RANGE, LAST_MODIFIED};
use hyper::Method;
use std::time::SystemTime;

/// Date preconditions, checked before any range handling.
pub fn check(
    headers: &HeaderMap,
    method: &Method,
    modified: Option<SystemTime>,
) -> Result<(), StreamError> {
    let Some(modified) = modified else {
        return Ok(());
    };

    if let Some(since) = headers.typed_get::<IfUnmodifiedSince>() {
        if !since.precondition_passes(modified) {
            return Err(StreamError::PreconditionFailed);
        }
    }

    // No entity tags are ever produced, so If-None-Match can't match,
    // and when present it takes precedence over If-Modified-Since.
    let safe_method = matches!(*method, Method::GET | Method::HEAD);
    if safe_method && !headers.contains_key(IF_NONE_MATCH) {
        if let Some(since) = headers.typed_get::<IfModifiedSince>() {
            if !since.is_modified(modified) {
                return Err(StreamError::NotModified(modified));
            }
        }
    }

    Ok(())
}

/// Whether a `Range` header may be honored, given any `If-Range`.
///
/// The range is only honored if `If-Range` is exactly the `Last-Modified` value
/// this file would be served with. Later dates, earlier dates and entity tags
/// all fall back to the full body.
pub fn range_allowed(headers: &HeaderMap, modified: Option<SystemTime>) -> bool {
    let Some(if_range) = headers.get(IF_RANGE) else {
        return true;
    };
    let Some(modified) = modified else {
        return false;
    };
    let mut current = HeaderMap::new();
    current.typed_insert(LastModified::from(modified));
    current.get(LAST_MODIFIED) == Some(if_range)
}
