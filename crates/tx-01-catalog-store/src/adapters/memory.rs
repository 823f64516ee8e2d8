use crate::domain::errors::StoreError;
use crate::domain::records::ServiceRecord;
use crate::ports::inbound::{CatalogAdmin, CollectionStore, ServiceStore};
use parking_lot::RwLock;
use shared_types::{CollectionDescriptor, ServiceKind};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory catalog for unit and integration tests.
///
/// Besides the port traits it can be switched offline to simulate a backing
/// store outage, and counts reads of the service list.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    services: RwLock<Vec<ServiceRecord>>,
    collections: RwLock<BTreeMap<String, String>>,
    next_service_id: AtomicUsize,
    offline: AtomicBool,
    service_reads: AtomicUsize,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of collections.
    pub fn with_collections<'a>(self, collections: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        {
            let mut map = self.collections.write();
            for (name, description) in collections {
                map.insert(name.to_string(), description.to_string());
            }
        }
        self
    }

    /// Replace the whole service list, tags included verbatim.
    pub fn set_services<'a>(&self, services: impl IntoIterator<Item = (&'a str, bool, &'a str)>) {
        let records = services
            .into_iter()
            .map(|(tag, available, address)| self.record(tag, available, address))
            .collect();
        *self.services.write() = records;
    }

    /// Replace the whole collection catalog.
    pub fn set_collections<'a>(&self, collections: impl IntoIterator<Item = (&'a str, &'a str)>) {
        *self.collections.write() = collections
            .into_iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect();
    }

    /// While offline every operation fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful `list_services` calls so far.
    pub fn service_reads(&self) -> usize {
        self.service_reads.load(Ordering::SeqCst)
    }

    fn record(&self, tag: &str, available: bool, address: &str) -> ServiceRecord {
        let id = self.next_service_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        ServiceRecord {
            id,
            service_type: tag.to_string(),
            available,
            address: address.to_string(),
        }
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory catalog is offline".into()));
        }
        Ok(())
    }
}

impl ServiceStore for InMemoryCatalogStore {
    fn list_services(&self) -> Result<Vec<ServiceRecord>, StoreError> {
        self.ensure_online()?;
        let services = self.services.read().clone();
        self.service_reads.fetch_add(1, Ordering::SeqCst);
        Ok(services)
    }
}

impl CollectionStore for InMemoryCatalogStore {
    fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .collections
            .read()
            .iter()
            .map(|(name, description)| CollectionDescriptor::new(name.clone(), description.clone()))
            .collect())
    }
}

impl CatalogAdmin for InMemoryCatalogStore {
    fn add_collection(&self, collection: &CollectionDescriptor) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut map = self.collections.write();
        if map.contains_key(&collection.name) {
            return Err(StoreError::DuplicateCollection(collection.name.clone()));
        }
        map.insert(collection.name.clone(), collection.description.clone());
        Ok(())
    }

    fn delete_collection(&self, name: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.collections.write().remove(name).is_some())
    }

    fn add_service(
        &self,
        kind: ServiceKind,
        available: bool,
        address: &str,
    ) -> Result<i64, StoreError> {
        self.ensure_online()?;
        let record = self.record(kind.tag(), available, address);
        let id = record.id;
        self.services.write().push(record);
        Ok(id)
    }

    fn delete_service(&self, id: i64) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut services = self.services.write();
        let before = services.len();
        services.retain(|s| s.id != id);
        Ok(services.len() != before)
    }
}
