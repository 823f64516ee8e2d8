//! Admin trigger.
//!
//! Not a protocol endpoint: no TAXII headers are checked and no body is
//! read. `?reloadservices=true` marks the service registry dirty; any other
//! query is a no-op.

use super::on_blocking_pool;
use crate::router::AppState;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_types::RELOAD_SERVICES_PARAM;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Acknowledgement returned by the admin path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAck {
    /// Whether this request asked for a reload
    pub reload_services: bool,
    /// Registry flag after handling the request
    pub dirty: bool,
}

pub async fn handle_admin(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let requested = reload_requested(query.as_deref());
    let registry = Arc::clone(&state.registry);

    // mark_dirty waits behind an in-flight refresh, so keep it off the runtime
    let result = on_blocking_pool(move || {
        let newly = requested && registry.mark_dirty();
        Ok((newly, registry.is_dirty()))
    })
    .await;

    match result {
        Ok((newly, dirty)) => {
            if newly {
                info!("Service registry marked for reload");
            } else if requested {
                debug!("Service registry reload already pending");
            }
            Json(AdminAck {
                reload_services: requested,
                dirty,
            })
            .into_response()
        }
        Err(e) => {
            error!(
                error = %e,
                transient = e.is_transient(),
                "Admin trigger failed"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Whether the raw query carries `reloadservices=true`.
///
/// Only the first `reloadservices` pair counts and the value must be exactly
/// `true`.
pub fn reload_requested(query: Option<&str>) -> bool {
    query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == RELOAD_SERVICES_PARAM)
        .is_some_and(|(_, value)| value == "true")
}
