//! # Catalog Store (tx-01)
//!
//! The Catalog Store is the persistence layer behind the TAXII gateway. It
//! holds the rows the gateway advertises: the service endpoints listed by
//! Discovery and the collections offered by the Collection and Poll services.
//!
//! ## Schema
//!
//! ```text
//! ServiceType (id, type)                 Discovery | Collection | Poll | Inbox
//!      ▲
//!      │ typeid
//! Services    (id, typeid, available, address)
//!
//! Collections (collection, description)  collection is the unique key
//! ```
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Store errors and raw service records
//! - `ports/` - Read ports consumed by the gateway, write port used by tooling
//! - `adapters/` - SQLite adapter for production, in-memory adapter for tests
//!
//! ## Usage
//!
//! ```ignore
//! use tx_01_catalog_store::{CollectionStore, SqliteCatalogStore};
//!
//! let store = SqliteCatalogStore::open("data/taxii.db")?;
//! for collection in store.list_collections()? {
//!     println!("{}: {}", collection.name, collection.description);
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryCatalogStore, SqliteCatalogStore};
pub use domain::errors::StoreError;
pub use domain::records::ServiceRecord;
pub use ports::inbound::{CatalogAdmin, CollectionStore, ServiceStore};
