//! TAXII-Mgmt: management utility for the TAXII exchange server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared_types::ServiceKind;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tx_01_catalog_store::SqliteCatalogStore;
use tx_02_taxii_gateway::ServerConfig;

use taxii_mgmt::api::AdminApiClient;
use taxii_mgmt::commands;

/// TAXII-Mgmt: manage the catalog of a TAXII exchange server
#[derive(Parser, Debug)]
#[command(name = "taxii-mgmt", version, about)]
struct Args {
    /// Server configuration file (TOML); supplies the database path and admin URL
    #[arg(short, long, env = "TAXII_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog database, overrides the configuration
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the catalog schema if missing
    Init {
        /// Register the configured Discovery, Collection and Poll paths under this base URL
        #[arg(long)]
        seed: Option<String>,
    },
    /// Manage collections
    #[command(subcommand)]
    Collections(CollectionCommand),
    /// Manage advertised services
    #[command(subcommand)]
    Services(ServiceCommand),
    /// Ask a running server to reload its service list
    Reload {
        /// Admin URL, defaults to the configured listen address and admin path
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum CollectionCommand {
    /// List collections
    List,
    /// Add a collection
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a collection
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum ServiceCommand {
    /// List services
    List,
    /// Add a service: Discovery, Collection, Poll or Inbox
    Add {
        kind: ServiceKind,
        address: String,
        /// Advertise the service as unavailable
        #[arg(long)]
        unavailable: bool,
    },
    /// Delete a service by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config
        .apply_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;
    let db_path = args.db.unwrap_or_else(|| config.system.db_path.clone());

    let output = match args.command {
        Command::Reload { url } => {
            let url = match url {
                Some(url) => url,
                None => commands::admin_url(config.system.listen, &config.services.admin)?,
            };
            let client = AdminApiClient::new(url)?;
            commands::reload(&client).await?
        }
        command => {
            debug!(db = %db_path.display(), "Opening catalog");
            let store = SqliteCatalogStore::open(&db_path)
                .with_context(|| format!("Failed to open catalog at {}", db_path.display()))?;
            run_catalog_command(&store, &config, command)?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn run_catalog_command(
    store: &SqliteCatalogStore,
    config: &ServerConfig,
    command: Command,
) -> Result<String, commands::ManagementError> {
    match command {
        Command::Init { seed } => commands::init(store, &config.services, seed.as_deref()),
        Command::Collections(CollectionCommand::List) => commands::list_collections(store),
        Command::Collections(CollectionCommand::Add { name, description }) => {
            commands::add_collection(store, &name, &description)
        }
        Command::Collections(CollectionCommand::Delete { name }) => {
            commands::delete_collection(store, &name)
        }
        Command::Services(ServiceCommand::List) => commands::list_services(store),
        Command::Services(ServiceCommand::Add {
            kind,
            address,
            unavailable,
        }) => commands::add_service(store, kind, !unavailable, &address),
        Command::Services(ServiceCommand::Delete { id }) => commands::delete_service(store, id),
        Command::Reload { .. } => Ok(String::new()),
    }
}
