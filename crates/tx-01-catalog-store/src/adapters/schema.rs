use rusqlite::{params, Connection};
use shared_types::ServiceKind;

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS ServiceType (
    id   INTEGER PRIMARY KEY,
    type TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS Services (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    typeid    INTEGER NOT NULL REFERENCES ServiceType(id),
    available INTEGER NOT NULL DEFAULT 1,
    address   TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Collections (
    collection  TEXT PRIMARY KEY,
    description TEXT NOT NULL DEFAULT ''
);
";

/// Create missing tables and seed one `ServiceType` row per [`ServiceKind`].
///
/// Safe to run against an existing catalog: nothing is dropped or rewritten.
pub(crate) fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)?;

    let mut seed = conn.prepare("INSERT OR IGNORE INTO ServiceType (id, type) VALUES (?1, ?2)")?;
    for (index, kind) in ServiceKind::ALL.iter().enumerate() {
        seed.execute(params![index as i64 + 1, kind.tag()])?;
    }
    Ok(())
}
