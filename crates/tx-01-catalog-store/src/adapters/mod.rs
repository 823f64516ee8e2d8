//! # Adapters Module
//!
//! Implementations of the catalog ports.
//!
//! ## Modules
//!
//! - `sqlite`: SQLite-backed store used by the server and management tool
//! - `memory`: In-memory store for unit and integration tests
//! - `schema`: DDL and seed rows shared by the SQLite adapter

mod memory;
mod schema;
mod sqlite;

pub use memory::InMemoryCatalogStore;
pub use sqlite::SqliteCatalogStore;
