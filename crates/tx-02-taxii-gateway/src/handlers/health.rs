//! Liveness endpoint.

use super::on_blocking_pool;
use crate::router::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Liveness plus the size of the currently held service list. Never
/// triggers a registry refresh.
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    // snapshot waits behind an in-flight refresh
    let registry = Arc::clone(&state.registry);
    let advertised = on_blocking_pool(move || Ok(registry.snapshot().len()))
        .await
        .ok();

    Json(serde_json::json!({
        "status": "healthy",
        "service": "taxii-gateway",
        "version": crate::VERSION,
        "advertisedServices": advertised,
    }))
}
