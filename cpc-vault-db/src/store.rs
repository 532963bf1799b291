//! [`RecordStore`] backed by a single SQLite connection.

use std::path::Path;

use cpc_vault_catalog::{CatalogEntry, CatalogEntryInput, RecordStore, StoreError};
use rusqlite::Connection;

use crate::operations;
use crate::schema::{self, SchemaError};

/// SQLite-backed record store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the catalog database at `path`, migrating it if needed.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_database(path)?,
        })
    }

    /// A fresh in-memory store. Useful for testing.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    /// The underlying connection, for read queries outside the store contract.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteStore {
    fn select_all_ordered(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        Ok(operations::list_games(&self.conn)?)
    }

    fn select_by_key(&self, key: &str) -> Result<Option<CatalogEntry>, StoreError> {
        Ok(operations::find_game(&self.conn, key)?)
    }

    fn insert_unique(&self, input: &CatalogEntryInput) -> Result<CatalogEntry, StoreError> {
        Ok(operations::insert_game(&self.conn, input)?)
    }

    fn update_by_key(
        &self,
        key: &str,
        input: &CatalogEntryInput,
    ) -> Result<CatalogEntry, StoreError> {
        Ok(operations::update_game(&self.conn, key, input)?)
    }

    fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        Ok(operations::delete_game(&self.conn, key)?)
    }
}
