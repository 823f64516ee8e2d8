//! # TAXII Server
//!
//! Serves the Discovery, Collection and Poll services from a SQLite catalog.
//!
//! ```text
//! taxii-server --config /etc/taxii/server.toml
//! TAXII_LISTEN=0.0.0.0:8000 taxii-server
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use server_runtime::{init_logging, load_config, ServerRuntime};
use tx_02_taxii_gateway::server_version;

/// TAXII exchange server
#[derive(Parser, Debug)]
#[command(name = "taxii-server", version, about)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "TAXII_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides the configuration
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(
        args.config.as_deref(),
        |key| std::env::var(key).ok(),
        args.listen,
    )?;
    init_logging(&config.logging.level)?;

    info!("===========================================");
    info!("  {}", server_version());
    info!("===========================================");
    info!(db = %config.system.db_path.display(), "Catalog");

    let runtime = Arc::new(ServerRuntime::new(config)?);
    let listener = runtime.gateway().bind().await?;

    let mut server = {
        let runtime = Arc::clone(&runtime);
        tokio::spawn(async move { runtime.run(listener).await })
    };

    info!("Server is running. Press Ctrl+C to stop.");
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Received shutdown signal");
            runtime.shutdown();
            server.await.context("Server task panicked")??;
        }
        result = &mut server => {
            result.context("Server task panicked")??;
        }
    }

    info!("Shutdown complete");
    Ok(())
}
