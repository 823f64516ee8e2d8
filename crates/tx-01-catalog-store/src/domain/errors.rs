//! # Domain Errors
//!
//! Error types for the Catalog Store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file or its directory could not be prepared.
    #[error("catalog I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SQLite rejected an open, query or statement.
    #[error("catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A collection with this name is already in the catalog.
    #[error("collection already exists: {0}")]
    DuplicateCollection(String),

    /// The `ServiceType` table has no row for this tag.
    #[error("unknown service type: {0}")]
    UnknownServiceType(String),

    /// The backing store cannot be reached right now.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Io { .. })
            || matches!(
                self,
                StoreError::Database(rusqlite::Error::SqliteFailure(e, _))
                    if matches!(
                        e.code,
                        rusqlite::ErrorCode::DatabaseBusy
                            | rusqlite::ErrorCode::DatabaseLocked
                            | rusqlite::ErrorCode::CannotOpen
                    )
            )
    }
}
