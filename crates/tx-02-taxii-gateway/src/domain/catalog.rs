//! Collection authorization.
//!
//! Every call reads the store; nothing is cached, so two concurrent requests
//! may see different catalogs.

use shared_types::CollectionDescriptor;
use std::sync::Arc;
use tx_01_catalog_store::{CollectionStore, StoreError};

/// Read path over the collection catalog.
#[derive(Clone)]
pub struct CollectionCatalog {
    store: Arc<dyn CollectionStore>,
}

impl CollectionCatalog {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Every collection currently in the catalog.
    pub fn authorized_collections(&self) -> Result<Vec<CollectionDescriptor>, StoreError> {
        self.store.list_collections()
    }

    /// Whether `name` is in the catalog. Names match exactly.
    pub fn is_authorized(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .authorized_collections()?
            .iter()
            .any(|collection| collection.name == name))
    }
}
