//! TX-02 TAXII Gateway - Discovery, Collection and Poll services over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          TAXII GATEWAY (tx-02)                        │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │   POST discovery     POST collection     POST poll     GET|POST admin │
//! │         │                   │                │               │        │
//! │  ┌──────┴───────────────────┴────────────────┴──────┐        │        │
//! │  │   Middleware:  Tracing → Timeout → BodyLimit     │        │        │
//! │  └──────┬───────────────────┬────────────────┬──────┘        │        │
//! │         │     headers → decode → require id  │               │        │
//! │         ▼                   ▼                ▼               ▼        │
//! │  ┌─────────────┐   ┌──────────────────────────────┐   mark_dirty()   │
//! │  │  Service    │   │     Collection Catalog       │         │        │
//! │  │  Registry   │◄──┼──────────────────────────────┼─────────┘        │
//! │  │ (refresh if │   │ (read per request, no cache) │                   │
//! │  │   dirty)    │   └──────────────┬───────────────┘                   │
//! │  └──────┬──────┘                  │         Content Provider          │
//! └─────────┼─────────────────────────┼──────────────(Poll)──────────────┘
//!           ▼                         ▼
//!     ServiceStore             CollectionStore          (tx-01-catalog-store)
//! ```
//!
//! Every protocol outcome, including errors, is an HTTP 200 carrying either
//! the response message or a status message.
//!
//! # Usage
//!
//! ```ignore
//! use tx_02_taxii_gateway::{ServerConfig, TaxiiGatewayService, WatchListContentProvider};
//!
//! let config = ServerConfig::default();
//! let store = Arc::new(SqliteCatalogStore::open(&config.system.db_path)?);
//! let content = Arc::new(WatchListContentProvider::new(&config.poll, config.timeouts.feed)?);
//! let gateway = TaxiiGatewayService::with_store(config, store, content)?;
//! let listener = gateway.bind().await?;
//! gateway.serve(listener, shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

// Re-exports for public API
pub use adapters::WatchListContentProvider;
pub use domain::catalog::CollectionCatalog;
pub use domain::config::{ConfigError, ServerConfig};
pub use domain::error::{ContentError, GatewayError, HeaderError};
pub use domain::registry::ServiceRegistry;
pub use handlers::admin::AdminAck;
pub use ports::outbound::ContentProvider;
pub use router::{build_router, AppState};
pub use service::TaxiiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server identification used in logs and `--version` output.
pub fn server_version() -> String {
    format!("taxii-exchange/v{}", VERSION)
}
