//! Poll service.

use super::{admit, on_blocking_pool, reject, reply};
use crate::domain::status::unknown_collection_text;
use crate::router::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use shared_types::{PollRequest, PollResponse, StatusMessage, StatusType};
use tracing::{error, field, info, instrument, warn, Span};

/// Return content for a collection that is in the catalog.
#[instrument(
    name = "poll",
    skip_all,
    fields(request_id = field::Empty, collection = field::Empty)
)]
pub async fn handle_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request: PollRequest = match admit(&headers, body, state.max_request_size).await {
        Ok(request) => request,
        Err(status) => return reject(&status),
    };
    let span = Span::current();
    span.record("request_id", request.id.as_str());
    span.record("collection", request.collection_name.as_str());

    let catalog = state.catalog.clone();
    let name = request.collection_name.clone();
    let authorized = match on_blocking_pool(move || catalog.is_authorized(&name)).await {
        Ok(authorized) => authorized,
        Err(e) => {
            error!(
                error = %e,
                transient = e.is_transient(),
                "Collection catalog read failed"
            );
            return reject(&StatusMessage::new(
                Some(&request.id),
                StatusType::Failure,
                "Unable to read the collection catalog",
            ));
        }
    };

    if !authorized {
        warn!("Poll Request asked for a collection that does not exist");
        return reject(&StatusMessage::new(
            Some(&request.id),
            StatusType::DestinationCollectionError,
            unknown_collection_text(&request.collection_name),
        ));
    }

    let block = match state.content.content_for(&request.collection_name).await {
        Ok(block) => block,
        Err(e) => {
            error!(error = %e, "Content generation failed");
            return reject(&StatusMessage::new(
                Some(&request.id),
                StatusType::Failure,
                format!(
                    "Unable to generate content for collection \"{}\"",
                    request.collection_name
                ),
            ));
        }
    };

    info!("Sending Poll Response");
    reply(&PollResponse::new(
        request.id,
        request.collection_name,
        state.poll.result_id.as_str(),
        state.poll.message.as_str(),
        vec![block],
    ))
}
