//! Route table and shared handler state.

use crate::domain::catalog::CollectionCatalog;
use crate::domain::config::{
    CollectionConfig, PollConfig, ServerConfig, ServiceRoute, HEALTH_PATH,
};
use crate::domain::registry::ServiceRegistry;
use crate::handlers::{
    handle_admin, handle_collection, handle_discovery, handle_health, handle_poll,
};
use crate::middleware::{TimeoutLayer, TracingLayer};
use crate::ports::outbound::ContentProvider;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub catalog: CollectionCatalog,
    pub content: Arc<dyn ContentProvider>,
    pub collection: Arc<CollectionConfig>,
    pub poll: Arc<PollConfig>,
    /// Largest protocol body read, in bytes
    pub max_request_size: usize,
}

/// Mount every configured service, the admin path and `/health`.
///
/// Protocol services accept `POST` only; the admin path accepts `GET` and
/// `POST`.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    let mut router = Router::new().route(HEALTH_PATH, get(handle_health));

    for (route, path) in config.services.protocol_routes() {
        let handler = match route {
            ServiceRoute::Discovery => post(handle_discovery),
            ServiceRoute::Collection => post(handle_collection),
            ServiceRoute::Poll => post(handle_poll),
        };
        info!(service = route.name(), path, "Mounting service");
        router = router.route(path, handler);
    }

    if !config.services.admin.is_empty() {
        info!(path = %config.services.admin, "Mounting admin trigger");
        router = router.route(&config.services.admin, get(handle_admin).post(handle_admin));
    }

    // Innermost first: each call wraps everything added before it
    router
        .layer(TimeoutLayer::new(config.timeouts.request))
        .layer(TracingLayer::new())
        .with_state(state)
}
