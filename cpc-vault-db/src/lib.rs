//! SQLite persistence layer for the game catalog.
//!
//! Provides schema creation, the `games` table operations, and a
//! [`RecordStore`](cpc_vault_catalog::RecordStore) implementation backed by
//! SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    OperationError, delete_game, find_game, insert_game, list_games, update_game,
};
pub use queries::{CatalogStats, catalog_stats, games_by_status, search_games};
pub use schema::{SchemaError, open_database, open_memory};
pub use store::SqliteStore;
