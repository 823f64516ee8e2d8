//! Protocol header validation.
//!
//! Runs before the body is read so a header failure never depends on the
//! body. Checks are ordered and the first failure wins.

use crate::domain::error::HeaderError;
use axum::http::HeaderMap;
use shared_types::{
    HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_SERVICES, MESSAGE_ENCODING_JSON, PROTOCOL_VERSION,
};

/// Validate the three protocol headers in order:
/// `X-TAXII-Services`, `X-TAXII-Accept`, `X-TAXII-Content-Type`.
///
/// An empty header value counts as missing. Values are compared exactly.
pub fn validate_headers(headers: &HeaderMap) -> Result<(), HeaderError> {
    check(
        headers,
        HEADER_SERVICES,
        PROTOCOL_VERSION,
        HeaderError::MissingServices,
        HeaderError::UnsupportedServices,
    )?;
    check(
        headers,
        HEADER_ACCEPT,
        MESSAGE_ENCODING_JSON,
        HeaderError::MissingAccept,
        HeaderError::UnsupportedAccept,
    )?;
    check(
        headers,
        HEADER_CONTENT_TYPE,
        MESSAGE_ENCODING_JSON,
        HeaderError::MissingContentType,
        HeaderError::UnsupportedContentType,
    )
}

fn check(
    headers: &HeaderMap,
    name: &str,
    expected: &str,
    missing: HeaderError,
    unsupported: fn(String) -> HeaderError,
) -> Result<(), HeaderError> {
    match headers.get(name).map(|v| v.as_bytes()) {
        None | Some(b"") => Err(missing),
        Some(value) if value == expected.as_bytes() => Ok(()),
        Some(value) => Err(unsupported(String::from_utf8_lossy(value).into_owned())),
    }
}
