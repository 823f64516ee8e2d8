//! Discovery service.

use super::{admit, on_blocking_pool, reject, reply};
use crate::router::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use shared_types::{DiscoveryRequest, DiscoveryResponse, StatusMessage, StatusType};
use std::sync::Arc;
use tracing::{error, field, info, instrument, Span};

/// Advertise the services in the registry, refreshing it first if dirty.
///
/// An empty list is a valid answer.
#[instrument(name = "discovery", skip_all, fields(request_id = field::Empty))]
pub async fn handle_discovery(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request: DiscoveryRequest = match admit(&headers, body, state.max_request_size).await {
        Ok(request) => request,
        Err(status) => return reject(&status),
    };
    Span::current().record("request_id", request.id.as_str());

    let registry = Arc::clone(&state.registry);
    match on_blocking_pool(move || registry.refresh_if_dirty()).await {
        Ok(services) => {
            info!(services = services.len(), "Sending Discovery Response");
            reply(&DiscoveryResponse::new(request.id, services.iter()))
        }
        Err(e) => {
            error!(
                error = %e,
                transient = e.is_transient(),
                "Service registry refresh failed"
            );
            reject(&StatusMessage::new(
                Some(&request.id),
                StatusType::Failure,
                "Unable to load the service list",
            ))
        }
    }
}
