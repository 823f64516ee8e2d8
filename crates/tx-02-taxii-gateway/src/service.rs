//! TAXII gateway service - wiring and server lifecycle.

use crate::domain::catalog::CollectionCatalog;
use crate::domain::config::ServerConfig;
use crate::domain::error::GatewayError;
use crate::domain::registry::ServiceRegistry;
use crate::ports::outbound::ContentProvider;
use crate::router::{build_router, AppState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tx_01_catalog_store::{CollectionStore, ServiceStore};

/// The TAXII gateway: registry, catalog and content provider behind one router.
pub struct TaxiiGatewayService {
    config: ServerConfig,
    state: AppState,
}

impl TaxiiGatewayService {
    /// Validate `config` and wire the gateway over its collaborators.
    ///
    /// With `startup.load_services` set the registry starts dirty, so the
    /// first Discovery request loads the service list.
    pub fn new(
        config: ServerConfig,
        services: Arc<dyn ServiceStore>,
        collections: Arc<dyn CollectionStore>,
        content: Arc<dyn ContentProvider>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let registry = Arc::new(ServiceRegistry::new(services));
        if config.startup.load_services {
            registry.mark_dirty();
        }

        let state = AppState {
            registry,
            catalog: CollectionCatalog::new(collections),
            content,
            collection: Arc::new(config.collection.clone()),
            poll: Arc::new(config.poll.clone()),
            max_request_size: config.limits.max_request_size,
        };

        Ok(Self { config, state })
    }

    /// Convenience for a store that serves both services and collections.
    pub fn with_store<S>(
        config: ServerConfig,
        store: Arc<S>,
        content: Arc<dyn ContentProvider>,
    ) -> Result<Self, GatewayError>
    where
        S: ServiceStore + CollectionStore + 'static,
    {
        Self::new(config, store.clone(), store, content)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared handle to the service registry.
    pub fn registry(&self) -> Arc<ServiceRegistry> {
        Arc::clone(&self.state.registry)
    }

    /// The full router, middleware included.
    pub fn router(&self) -> Router {
        build_router(&self.config, self.state.clone())
    }

    /// Bind the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.system.listen;
        TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })
    }

    /// Serve on `listener` until `shutdown` resolves, then drain connections.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(GatewayError::Serve)?;
        info!(%addr, "TAXII gateway listening");

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(GatewayError::Serve)?;

        info!("TAXII gateway stopped");
        Ok(())
    }
}
