//! SQLite-backed catalog database handle.

use super::error::StoreError;
use super::repository::Entity;
use super::schema::{create_schema, SCHEMA_VERSION};
use super::unit_of_work::UnitOfWork;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Owner of the catalog's SQLite connection.
///
/// Opening creates the schema on a fresh database and validates the schema
/// version on an existing one. Units of work are handed out per logical
/// operation over the shared connection handle.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path.as_ref())?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::initialize(conn)
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        if table_count == 0 {
            info!("Creating catalog schema at version {}", SCHEMA_VERSION);
            create_schema(&conn)?;
        } else {
            let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
            if version != SCHEMA_VERSION {
                return Err(StoreError::UnsupportedSchemaVersion {
                    found: version,
                    expected: SCHEMA_VERSION,
                });
            }
        }

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// A fresh unit of work scoped to one logical operation.
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.conn.clone())
    }

    /// Number of rows in the entity's table.
    pub fn count<T: Entity>(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", T::TABLE), [], |r| {
            r.get(0)
        })?;
        Ok(count)
    }
}
