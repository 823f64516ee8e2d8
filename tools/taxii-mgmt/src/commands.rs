//! Management commands.
//!
//! Each command works against the catalog ports and returns the text to
//! print, so the same code runs against SQLite in production and the
//! in-memory store in tests.

use shared_types::{CollectionDescriptor, ServiceKind};
use thiserror::Error;
use tx_01_catalog_store::{CatalogAdmin, CollectionStore, ServiceStore, StoreError};
use tx_02_taxii_gateway::domain::config::ServicesConfig;

use crate::api::{AdminApiClient, ApiError};

#[derive(Debug, Error)]
pub enum ManagementError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no collection named {0:?}")]
    NoSuchCollection(String),
    #[error("no service with id {0}")]
    NoSuchService(i64),
    #[error("the server configuration has no admin path")]
    NoAdminPath,
}

pub type Result<T> = std::result::Result<T, ManagementError>;

/// Report catalog readiness and optionally register the configured services.
///
/// Seeding only happens into an empty service table; addresses are
/// `base_url` joined with each configured path.
pub fn init<S>(store: &S, services: &ServicesConfig, seed_base_url: Option<&str>) -> Result<String>
where
    S: ServiceStore + CatalogAdmin,
{
    let Some(base_url) = seed_base_url else {
        return Ok("Catalog schema is up to date".to_string());
    };

    if !store.list_services()?.is_empty() {
        return Ok("Catalog already has services, nothing seeded".to_string());
    }

    let base_url = base_url.trim_end_matches('/');
    let mut out = String::new();
    for (kind, path) in [
        (ServiceKind::Discovery, &services.discovery),
        (ServiceKind::Collection, &services.collection),
        (ServiceKind::Poll, &services.poll),
    ] {
        if path.is_empty() {
            continue;
        }
        let address = format!("{base_url}{path}");
        let id = store.add_service(kind, true, &address)?;
        out.push_str(&format!("Added {kind} service #{id} at {address}\n"));
    }
    Ok(out)
}

pub fn list_collections(store: &dyn CollectionStore) -> Result<String> {
    let collections = store.list_collections()?;
    let mut out = String::from("Current Collections\n===================\n");
    if collections.is_empty() {
        out.push_str("  (none)\n");
    }
    for collection in collections {
        out.push_str(&format!("  {:<24} {}\n", collection.name, collection.description));
    }
    Ok(out)
}

pub fn add_collection(store: &dyn CatalogAdmin, name: &str, description: &str) -> Result<String> {
    store.add_collection(&CollectionDescriptor::new(name, description))?;
    Ok(format!("Added collection {name}"))
}

pub fn delete_collection(store: &dyn CatalogAdmin, name: &str) -> Result<String> {
    if !store.delete_collection(name)? {
        return Err(ManagementError::NoSuchCollection(name.to_string()));
    }
    Ok(format!("Deleted collection {name}"))
}

pub fn list_services(store: &dyn ServiceStore) -> Result<String> {
    let services = store.list_services()?;
    let mut out = String::from("Current Services\n================\n");
    if services.is_empty() {
        out.push_str("  (none)\n");
    }
    for service in services {
        let state = if service.available { "available" } else { "unavailable" };
        out.push_str(&format!(
            "  #{:<4} {:<12} {:<12} {}\n",
            service.id, service.service_type, state, service.address
        ));
    }
    Ok(out)
}

pub fn add_service(
    store: &dyn CatalogAdmin,
    kind: ServiceKind,
    available: bool,
    address: &str,
) -> Result<String> {
    let id = store.add_service(kind, available, address)?;
    Ok(format!("Added {kind} service #{id} at {address}"))
}

pub fn delete_service(store: &dyn CatalogAdmin, id: i64) -> Result<String> {
    if !store.delete_service(id)? {
        return Err(ManagementError::NoSuchService(id));
    }
    Ok(format!("Deleted service #{id}"))
}

/// Ask a running server to reload its service list.
pub async fn reload(client: &AdminApiClient) -> Result<String> {
    let ack = client.reload_services().await?;
    Ok(if ack.dirty {
        "Reload scheduled, the next Discovery request will reload services".to_string()
    } else {
        "Server did not mark its registry for reload".to_string()
    })
}

/// Admin URL for a server listening on `listen` with admin path `admin`.
pub fn admin_url(listen: std::net::SocketAddr, admin: &str) -> Result<String> {
    if admin.is_empty() {
        return Err(ManagementError::NoAdminPath);
    }
    let host = if listen.ip().is_unspecified() {
        "127.0.0.1".to_string()
    } else {
        listen.ip().to_string()
    };
    let host = if listen.is_ipv6() && !listen.ip().is_unspecified() {
        format!("[{host}]")
    } else {
        host
    };
    Ok(format!("http://{host}:{}{admin}", listen.port()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_01_catalog_store::InMemoryCatalogStore;

    #[test]
    fn test_collection_commands() {
        let store = InMemoryCatalogStore::new();
        assert!(list_collections(&store).unwrap().contains("(none)"));

        add_collection(&store, "ip-watch-list", "Malicious IPs").unwrap();
        let listing = list_collections(&store).unwrap();
        assert!(listing.contains("ip-watch-list"));
        assert!(listing.contains("Malicious IPs"));

        assert!(matches!(
            add_collection(&store, "ip-watch-list", "again"),
            Err(ManagementError::Store(StoreError::DuplicateCollection(_)))
        ));

        delete_collection(&store, "ip-watch-list").unwrap();
        assert!(matches!(
            delete_collection(&store, "ip-watch-list"),
            Err(ManagementError::NoSuchCollection(name)) if name == "ip-watch-list"
        ));
    }

    #[test]
    fn test_service_commands() {
        let store = InMemoryCatalogStore::new();
        let out = add_service(&store, ServiceKind::Poll, false, "http://localhost/poll/").unwrap();
        assert!(out.starts_with("Added Poll service #1"));

        let listing = list_services(&store).unwrap();
        assert!(listing.contains("unavailable"));
        assert!(listing.contains("http://localhost/poll/"));

        delete_service(&store, 1).unwrap();
        assert!(matches!(
            delete_service(&store, 1),
            Err(ManagementError::NoSuchService(1))
        ));
    }

    #[test]
    fn test_init_seeds_configured_paths_once() {
        let store = InMemoryCatalogStore::new();
        let mut services = ServicesConfig::default();
        services.collection.clear();

        let out = init(&store, &services, Some("http://taxii.example.org/")).unwrap();
        assert!(out.contains("http://taxii.example.org/services/discovery/"));

        let records = store.list_services().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].service_type, "Poll");

        let out = init(&store, &services, Some("http://taxii.example.org")).unwrap();
        assert!(out.contains("nothing seeded"));
        assert_eq!(store.list_services().unwrap().len(), 2);
    }

    #[test]
    fn test_sqlite_catalog_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxii.db");
        {
            let store = tx_01_catalog_store::SqliteCatalogStore::open(&path).unwrap();
            add_collection(&store, "watch-list", "Generic watch list").unwrap();
            add_service(&store, ServiceKind::Discovery, true, "http://localhost/d/").unwrap();
        }

        let store = tx_01_catalog_store::SqliteCatalogStore::open(&path).unwrap();
        assert!(list_collections(&store).unwrap().contains("watch-list"));
        assert!(list_services(&store).unwrap().contains("Discovery"));
    }

    #[test]
    fn test_admin_url() {
        let url = admin_url("0.0.0.0:8000".parse().unwrap(), "/admin/").unwrap();
        assert_eq!(url, "http://127.0.0.1:8000/admin/");

        let url = admin_url("[::1]:8000".parse().unwrap(), "/admin/").unwrap();
        assert_eq!(url, "http://[::1]:8000/admin/");

        assert!(matches!(
            admin_url("127.0.0.1:8000".parse().unwrap(), ""),
            Err(ManagementError::NoAdminPath)
        ));
    }
}
