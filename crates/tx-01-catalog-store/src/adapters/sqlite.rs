use crate::adapters::schema;
use crate::domain::errors::StoreError;
use crate::domain::records::ServiceRecord;
use crate::ports::inbound::{CatalogAdmin, CollectionStore, ServiceStore};
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode};
use shared_types::{CollectionDescriptor, ServiceKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// SQLite-backed catalog.
///
/// Holds one connection behind a mutex; every call is a short statement, so
/// requests serialize on the connection rather than opening their own.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteCatalogStore {
    /// Open (creating if needed) the catalog at `path` and apply the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let existed = path.exists();
        let conn = Connection::open(&path)?;
        schema::apply(&conn)?;

        if existed {
            info!(path = %path.display(), "Opened catalog database");
        } else {
            info!(path = %path.display(), "Created catalog database");
        }

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// A private in-memory catalog, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Location of the database file, `None` for in-memory catalogs.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ServiceStore for SqliteCatalogStore {
    fn list_services(&self) -> Result<Vec<ServiceRecord>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT s.id, t.type, s.available, s.address
             FROM Services AS s
             INNER JOIN ServiceType AS t ON s.typeid = t.id
             ORDER BY s.id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ServiceRecord {
                id: row.get(0)?,
                service_type: row.get(1)?,
                available: row.get::<_, i64>(2)? == 1,
                address: row.get(3)?,
            })
        })?;

        let services = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(count = services.len(), "Read services from catalog");
        Ok(services)
    }
}

impl CollectionStore for SqliteCatalogStore {
    fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT collection, description FROM Collections ORDER BY collection")?;

        let rows = stmt.query_map([], |row| {
            Ok(CollectionDescriptor {
                name: row.get(0)?,
                description: row.get(1)?,
            })
        })?;

        let collections = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(count = collections.len(), "Read collections from catalog");
        Ok(collections)
    }
}

impl CatalogAdmin for SqliteCatalogStore {
    fn add_collection(&self, collection: &CollectionDescriptor) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO Collections (collection, description) VALUES (?1, ?2)",
            params![collection.name, collection.description],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref f, _) if f.code == ErrorCode::ConstraintViolation => {
                StoreError::DuplicateCollection(collection.name.clone())
            }
            other => StoreError::Database(other),
        })?;

        info!(collection = %collection.name, "Inserted collection");
        Ok(())
    }

    fn delete_collection(&self, name: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM Collections WHERE collection = ?1", params![name])?;
        Ok(deleted > 0)
    }

    fn add_service(
        &self,
        kind: ServiceKind,
        available: bool,
        address: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        let inserted = conn.execute(
            "INSERT INTO Services (typeid, available, address)
             SELECT id, ?2, ?3 FROM ServiceType WHERE type = ?1",
            params![kind.tag(), available as i64, address],
        )?;

        if inserted == 0 {
            return Err(StoreError::UnknownServiceType(kind.tag().to_string()));
        }

        let id = conn.last_insert_rowid();
        info!(id, kind = %kind, address, "Inserted service");
        Ok(id)
    }

    fn delete_service(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        let deleted = conn.execute("DELETE FROM Services WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
