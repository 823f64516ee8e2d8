//! # TAXII Server Runtime
//!
//! Process-level wiring around the TAXII gateway.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration: file, then `TAXII_*` environment, then CLI flags
//! 2. Install logging (`RUST_LOG` wins over `logging.level`)
//! 3. Open (or create) the SQLite catalog
//! 4. Build the content provider and the gateway
//! 5. Bind and serve until shutdown is signalled

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tx_01_catalog_store::SqliteCatalogStore;
use tx_02_taxii_gateway::{ServerConfig, TaxiiGatewayService, WatchListContentProvider};

/// A running TAXII server: catalog, gateway and shutdown signal.
pub struct ServerRuntime {
    gateway: TaxiiGatewayService,
    store: Arc<SqliteCatalogStore>,
    shutdown_tx: watch::Sender<bool>,
}

impl ServerRuntime {
    /// Open the catalog and wire the gateway.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let store = Arc::new(
            SqliteCatalogStore::open(&config.system.db_path).with_context(|| {
                format!(
                    "Failed to open catalog at {}",
                    config.system.db_path.display()
                )
            })?,
        );

        let content = Arc::new(
            WatchListContentProvider::new(&config.poll, config.timeouts.feed)
                .context("Failed to build content provider")?,
        );

        let gateway = TaxiiGatewayService::with_store(config, Arc::clone(&store), content)
            .context("Failed to build TAXII gateway")?;

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            gateway,
            store,
            shutdown_tx,
        })
    }

    pub fn gateway(&self) -> &TaxiiGatewayService {
        &self.gateway
    }

    /// The catalog the gateway reads from.
    pub fn store(&self) -> Arc<SqliteCatalogStore> {
        Arc::clone(&self.store)
    }

    /// Serve on `listener` until [`ServerRuntime::shutdown`] is called.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        self.gateway
            .serve(listener, async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await
            .context("TAXII gateway failed")
    }

    /// Signal the server to stop accepting connections and drain.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        self.shutdown_tx.send_replace(true);
    }
}

/// Build the effective configuration.
///
/// Precedence, lowest first: defaults, the TOML file at `path`, `TAXII_*`
/// variables looked up through `lookup`, then `listen` from the command line.
pub fn load_config<F>(path: Option<&Path>, lookup: F, listen: Option<SocketAddr>) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ServerConfig::default(),
    };

    config
        .apply_overrides(lookup)
        .context("Invalid environment override")?;

    if let Some(listen) = listen {
        config.system.listen = listen;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Install the global `tracing` subscriber.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level {default_level:?}"))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
