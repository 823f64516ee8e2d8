//! Collection information service.

use super::{admit, on_blocking_pool, reject, reply};
use crate::router::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use shared_types::{CollectionRequest, CollectionResponse, StatusMessage, StatusType};
use tracing::{error, field, info, instrument, Span};

/// List every collection in the catalog.
///
/// No per-requester filtering: all collections are listed, while Poll
/// checks membership per request.
#[instrument(name = "collection", skip_all, fields(request_id = field::Empty))]
pub async fn handle_collection(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request: CollectionRequest = match admit(&headers, body, state.max_request_size).await {
        Ok(request) => request,
        Err(status) => return reject(&status),
    };
    Span::current().record("request_id", request.id.as_str());

    let catalog = state.catalog.clone();
    match on_blocking_pool(move || catalog.authorized_collections()).await {
        Ok(collections) => {
            info!(collections = collections.len(), "Sending Collection Response");
            reply(&CollectionResponse::new(
                request.id,
                &collections,
                state.collection.volume,
                &state.collection.poll_service_address,
            ))
        }
        Err(e) => {
            error!(
                error = %e,
                transient = e.is_transient(),
                "Collection catalog read failed"
            );
            reject(&StatusMessage::new(
                Some(&request.id),
                StatusType::Failure,
                "Unable to read the collection catalog",
            ))
        }
    }
}
