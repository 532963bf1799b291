//! Write operations and single-entry lookups for catalog entries.
//!
//! Every write is one SQL statement. Inserts rely on the `games.id` primary
//! key to reject duplicates; updates and deletes are conditional on the key
//! and report a missing row instead of silently doing nothing.

use cpc_vault_catalog::{CatalogEntry, CatalogEntryInput, EntryField, GameStatus, StoreError};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Duplicate {entity_type}: id '{id}' is already taken")]
    Duplicate { entity_type: String, id: String },
    #[error("Rejected {entity_type} '{id}': invalid {field}")]
    Rejected {
        entity_type: String,
        id: String,
        field: EntryField,
    },
}

impl From<OperationError> for StoreError {
    fn from(e: OperationError) -> Self {
        match e {
            OperationError::NotFound { id, .. } => StoreError::NotFound(id),
            OperationError::Duplicate { id, .. } => StoreError::DuplicateKey(id),
            OperationError::Rejected { id, field, .. } => StoreError::Rejected { key: id, field },
            OperationError::Sqlite(e) => StoreError::Unavailable(e.to_string()),
        }
    }
}

/// Column list shared by every query that builds a [`CatalogEntry`].
pub(crate) const GAME_COLUMNS: &str = "id, title, description, cover_image, screenshots,
    rvm_game_id, disk_url, emulator_command, genre, year, developer, publisher,
    status, display_order, created_at, updated_at";

/// Listing order: explicit positions first, then title.
pub(crate) const GAME_ORDER: &str =
    "display_order IS NULL, display_order, title COLLATE NOCASE, title, id";

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. Fails with [`OperationError::Duplicate`] if the key exists
/// and with [`OperationError::Rejected`] if the schema's integrity triggers refuse it.
pub fn insert_game(conn: &Connection, input: &CatalogEntryInput) -> Result<CatalogEntry, OperationError> {
    let screenshots = encode_screenshots(&input.screenshot_urls);
    let sql = format!(
        "INSERT INTO games (id, title, description, cover_image, screenshots,
             rvm_game_id, disk_url, emulator_command, genre, year, developer,
             publisher, status, display_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         RETURNING {GAME_COLUMNS}"
    );
    conn.query_row(
        &sql,
        params![
            input.key,
            input.title,
            input.description,
            input.cover_image_url,
            screenshots,
            input.legacy_player_id,
            input.media_url,
            input.play_command,
            input.genre,
            input.release_year,
            input.developer,
            input.publisher,
            input.status.as_str(),
            input.sort_order,
        ],
        row_to_game,
    )
    .map_err(|e| classify(e, &input.key))
}

/// Replace every column of the game at `key` except the key itself.
///
/// `input.key` is never written; `key` alone selects the row.
pub fn update_game(
    conn: &Connection,
    key: &str,
    input: &CatalogEntryInput,
) -> Result<CatalogEntry, OperationError> {
    let screenshots = encode_screenshots(&input.screenshot_urls);
    let sql = format!(
        "UPDATE games SET
             title = ?2,
             description = ?3,
             cover_image = ?4,
             screenshots = ?5,
             rvm_game_id = ?6,
             disk_url = ?7,
             emulator_command = ?8,
             genre = ?9,
             year = ?10,
             developer = ?11,
             publisher = ?12,
             status = ?13,
             display_order = ?14,
             updated_at = datetime('now')
         WHERE id = ?1
         RETURNING {GAME_COLUMNS}"
    );
    conn.query_row(
        &sql,
        params![
            key,
            input.title,
            input.description,
            input.cover_image_url,
            screenshots,
            input.legacy_player_id,
            input.media_url,
            input.play_command,
            input.genre,
            input.release_year,
            input.developer,
            input.publisher,
            input.status.as_str(),
            input.sort_order,
        ],
        row_to_game,
    )
    .optional()
    .map_err(|e| classify(e, key))?
    .ok_or_else(|| not_found(key))
}

/// Delete the game at `key`.
pub fn delete_game(conn: &Connection, key: &str) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM games WHERE id = ?1", params![key])?;
    if changed == 0 {
        return Err(not_found(key));
    }
    Ok(())
}

/// Find a game by key.
pub fn find_game(conn: &Connection, key: &str) -> Result<Option<CatalogEntry>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![key], row_to_game)
        .optional()
        .map_err(Into::into)
}

/// List every game in display order.
pub fn list_games(conn: &Connection) -> Result<Vec<CatalogEntry>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY {GAME_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Map a row selected with [`GAME_COLUMNS`] to a [`CatalogEntry`].
pub(crate) fn row_to_game(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    let screenshots_json: String = row.get(4)?;
    let screenshot_urls: Vec<String> = serde_json::from_str(&screenshots_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status_str: String = row.get(12)?;

    Ok(CatalogEntry {
        key: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        cover_image_url: row.get(3)?,
        screenshot_urls,
        legacy_player_id: row.get(5)?,
        media_url: row.get(6)?,
        play_command: row.get(7)?,
        genre: row.get(8)?,
        release_year: row.get(9)?,
        developer: row.get(10)?,
        publisher: row.get(11)?,
        // The CHECK constraint keeps this column to known values.
        status: GameStatus::parse(&status_str).unwrap_or_default(),
        sort_order: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

fn encode_screenshots(urls: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(urls).unwrap_or_else(|_| "[]".to_string())
}

/// Turn constraint failures on a write into the matching [`OperationError`].
fn classify(e: rusqlite::Error, key: &str) -> OperationError {
    if is_unique_violation(&e) {
        return OperationError::Duplicate {
            entity_type: "game".to_string(),
            id: key.to_string(),
        };
    }
    if let Some(field) = rejected_field(&e) {
        return OperationError::Rejected {
            entity_type: "game".to_string(),
            id: key.to_string(),
            field,
        };
    }
    e.into()
}

/// The field named by an integrity trigger's `RAISE(ABORT, ..)` message.
fn rejected_field(e: &rusqlite::Error) -> Option<EntryField> {
    match e {
        rusqlite::Error::SqliteFailure(err, Some(message))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER =>
        {
            EntryField::from_name(message)
        }
        _ => None,
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
            && (err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}

fn not_found(key: &str) -> OperationError {
    OperationError::NotFound {
        entity_type: "game".to_string(),
        id: key.to_string(),
    }
}
