//! HTTP handlers.
//!
//! The three protocol services share one skeleton:
//!
//! ```text
//! headers ──► decode body ──► require id ──► service step ──► JSON, HTTP 200
//!    │             │              │               │
//!    └─────────────┴──────────────┴───────────────┴──► status message, HTTP 200
//! ```
//!
//! Only a failure to serialize our own output leaves HTTP 200 (500, empty
//! body).

pub mod admin;
pub mod collection;
pub mod discovery;
pub mod health;
pub mod poll;

pub use admin::handle_admin;
pub use collection::handle_collection;
pub use discovery::handle_discovery;
pub use health::handle_health;
pub use poll::handle_poll;

use crate::domain::headers::validate_headers;
use crate::domain::status;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shared_types::{
    RequestMessage, StatusMessage, HEADER_CONTENT_TYPE, HEADER_SERVICES, JSON_MEDIA_TYPE,
    MESSAGE_ENCODING_JSON, PROTOCOL_VERSION,
};
use tracing::{debug, error};
use tx_01_catalog_store::StoreError;

/// Validate headers, read at most `limit` body bytes, decode and require a
/// non-empty id.
///
/// Headers are checked before the body is touched. Every rejection is a
/// `BAD_MESSAGE` without `inResponseTo`: up to this point no id has been
/// accepted.
pub(crate) async fn admit<R: RequestMessage>(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<R, StatusMessage> {
    if let Err(e) = validate_headers(headers) {
        debug!(kind = R::KIND, error = %e, "Rejected request headers");
        return Err(status::bad_message(e.to_string()));
    }

    let body = to_bytes(body, limit).await.map_err(|e| {
        debug!(kind = R::KIND, limit, error = %e, "Unreadable request body");
        status::bad_message(format!(
            "{} Request body could not be read within {limit} bytes",
            R::KIND
        ))
    })?;

    decode(&body)
}

/// Decode the first JSON value in `body` and require a non-empty id.
///
/// Bytes after the first value are ignored.
pub(crate) fn decode<R: RequestMessage>(body: &[u8]) -> Result<R, StatusMessage> {
    let decoded = serde_json::Deserializer::from_slice(body)
        .into_iter::<R>()
        .next();
    let request = match decoded {
        Some(Ok(request)) => request,
        Some(Err(e)) => {
            debug!(kind = R::KIND, error = %e, "Undecodable request body");
            return Err(undecodable::<R>());
        }
        None => {
            debug!(kind = R::KIND, "Empty request body");
            return Err(undecodable::<R>());
        }
    };

    if request.id().is_empty() {
        debug!(kind = R::KIND, "Request without id");
        return Err(status::bad_message(format!(
            "{} Request message did not include an ID",
            R::KIND
        )));
    }

    Ok(request)
}

fn undecodable<R: RequestMessage>() -> StatusMessage {
    status::bad_message(format!("Can not decode {} Request", R::KIND))
}

/// Write an encoded protocol body.
pub fn respond(body: Result<Vec<u8>, serde_json::Error>) -> Response {
    match body {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE)),
                (
                    header::HeaderName::from_static("x-taxii-content-type"),
                    HeaderValue::from_static(MESSAGE_ENCODING_JSON),
                ),
                (
                    header::HeaderName::from_static("x-taxii-services"),
                    HeaderValue::from_static(PROTOCOL_VERSION),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) fn reply<T: Serialize>(message: &T) -> Response {
    respond(serde_json::to_vec(message))
}

/// Write a status message. The status type rides along as a response
/// extension for the request span.
pub(crate) fn reject(message: &StatusMessage) -> Response {
    let mut response = respond(status::build(
        message.in_response_to.as_deref(),
        message.status_type,
        message.message.as_str(),
    ));
    response.extensions_mut().insert(message.status_type);
    response
}

/// Run a store call on the blocking pool.
pub(crate) async fn on_blocking_pool<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(format!("catalog task failed: {e}")))?
}
