//! # Inbound Ports (Driving Ports)
//!
//! The API this crate exposes.
//!
//! - [`ServiceStore`] and [`CollectionStore`] are the read contracts the
//!   gateway depends on (`list_services()`, `list_collections()`).
//! - [`CatalogAdmin`] is the write side used by the management tool.
//!
//! All operations are synchronous and may block on disk I/O; async callers
//! run them on a blocking thread.

use crate::domain::errors::StoreError;
use crate::domain::records::ServiceRecord;
use shared_types::{CollectionDescriptor, ServiceKind};

/// Read access to the advertised services.
pub trait ServiceStore: Send + Sync {
    /// Every service row, in insertion order.
    fn list_services(&self) -> Result<Vec<ServiceRecord>, StoreError>;
}

/// Read access to the collection catalog.
pub trait CollectionStore: Send + Sync {
    /// Every collection, ordered by name.
    fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, StoreError>;
}

/// Write access to the catalog.
pub trait CatalogAdmin: Send + Sync {
    /// Insert a collection. Fails with [`StoreError::DuplicateCollection`] if
    /// the name is taken.
    fn add_collection(&self, collection: &CollectionDescriptor) -> Result<(), StoreError>;

    /// Remove a collection by name. Returns `false` when nothing matched.
    fn delete_collection(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert a service row and return its id.
    fn add_service(&self, kind: ServiceKind, available: bool, address: &str)
        -> Result<i64, StoreError>;

    /// Remove a service row by id. Returns `false` when nothing matched.
    fn delete_service(&self, id: i64) -> Result<bool, StoreError>;
}
