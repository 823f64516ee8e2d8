//! Reloadable registry of advertised services.
//!
//! ```text
//!            mark_dirty()                     refresh_if_dirty()
//!  ┌───────┐ ──────────────► ┌───────┐ ─────────────────────────────► ┌───────┐
//!  │ clean │                 │ dirty │   load → translate → swap       │ clean │
//!  └───────┘ ◄── store error ┘───────┘   (one critical section)        └───────┘
//!                 (stays dirty)
//! ```
//!
//! The list is held as an `Arc<[ServiceDescriptor]>`. A refresh builds the
//! new list completely before swapping it in, so readers only ever see a
//! whole list.

use parking_lot::Mutex;
use shared_types::ServiceDescriptor;
use std::sync::Arc;
use tracing::{info, warn};
use tx_01_catalog_store::{ServiceStore, StoreError};

struct RegistryState {
    services: Arc<[ServiceDescriptor]>,
    dirty: bool,
}

/// Services advertised by Discovery, reloaded from the store on demand.
pub struct ServiceRegistry {
    store: Arc<dyn ServiceStore>,
    state: Mutex<RegistryState>,
}

impl ServiceRegistry {
    /// An empty, clean registry over `store`.
    pub fn new(store: Arc<dyn ServiceStore>) -> Self {
        Self {
            store,
            state: Mutex::new(RegistryState {
                services: Arc::from(Vec::new()),
                dirty: false,
            }),
        }
    }

    /// Flag the list as stale. Returns `true` if the flag was not already set.
    pub fn mark_dirty(&self) -> bool {
        let mut state = self.state.lock();
        let newly = !state.dirty;
        state.dirty = true;
        newly
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// The current list without refreshing.
    pub fn snapshot(&self) -> Arc<[ServiceDescriptor]> {
        Arc::clone(&self.state.lock().services)
    }

    /// Reload from the store if dirty, then return the current list.
    ///
    /// Blocks on store I/O while holding the registry lock, so concurrent
    /// callers that saw the flag set wait for the one refresh instead of
    /// running their own. On a store error nothing is swapped and the flag
    /// stays set, so the next call retries.
    pub fn refresh_if_dirty(&self) -> Result<Arc<[ServiceDescriptor]>, StoreError> {
        let mut state = self.state.lock();
        if state.dirty {
            let records = self.store.list_services()?;

            let services: Vec<ServiceDescriptor> = records
                .iter()
                .filter_map(|record| match record.to_descriptor() {
                    Ok(descriptor) => Some(descriptor),
                    Err(e) => {
                        warn!(id = record.id, tag = %e.tag, "Skipping service with unknown type");
                        None
                    }
                })
                .collect();

            info!(
                services = services.len(),
                skipped = records.len() - services.len(),
                "Reloaded service registry"
            );

            state.services = Arc::from(services);
            state.dirty = false;
        }
        Ok(Arc::clone(&state.services))
    }
}
