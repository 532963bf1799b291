//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 3;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute_batch(INTEGRITY_TRIGGERS_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        match version {
            1 => {
                // v2 introduced explicit listing order.
                conn.execute_batch(
                    "ALTER TABLE games ADD COLUMN display_order INTEGER;
                     CREATE INDEX IF NOT EXISTS idx_games_order ON games(display_order, title);",
                )?;
            }
            2 => {
                // v3 enforces key, screenshot and year integrity in the database.
                conn.execute_batch(INTEGRITY_TRIGGERS_SQL)?;
            }
            _ => {}
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Catalog entries. `id` is the entry key; the primary key constraint is what
-- makes keys unique.
CREATE TABLE IF NOT EXISTS games (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    cover_image TEXT NOT NULL,
    -- JSON array of URLs, never empty
    screenshots TEXT NOT NULL,
    rvm_game_id TEXT NOT NULL,
    disk_url TEXT NOT NULL,
    emulator_command TEXT NOT NULL,
    genre TEXT NOT NULL,
    year INTEGER NOT NULL,
    developer TEXT NOT NULL,
    publisher TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'finished' CHECK (status IN ('finished', 'wip')),
    display_order INTEGER,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_games_order ON games(display_order, title);
CREATE INDEX IF NOT EXISTS idx_games_status ON games(status);
"#;

/// Triggers that refuse rows breaking the entry invariants, whoever writes them.
///
/// Each `RAISE` message is the name of the offending field. The upper bound on
/// `year` depends on configuration, so only the lower bound lives here.
const INTEGRITY_TRIGGERS_SQL: &str = r#"
CREATE TRIGGER IF NOT EXISTS games_key_insert BEFORE INSERT ON games
WHEN NEW.id IS NULL OR NEW.id = '' OR NEW.id GLOB '*[^a-z0-9-]*'
BEGIN SELECT RAISE(ABORT, 'key'); END;

CREATE TRIGGER IF NOT EXISTS games_key_update BEFORE UPDATE OF id ON games
WHEN NEW.id IS NULL OR NEW.id = '' OR NEW.id GLOB '*[^a-z0-9-]*'
BEGIN SELECT RAISE(ABORT, 'key'); END;

CREATE TRIGGER IF NOT EXISTS games_screenshots_insert BEFORE INSERT ON games
WHEN CASE WHEN json_valid(NEW.screenshots)
          THEN json_type(NEW.screenshots) <> 'array' OR json_array_length(NEW.screenshots) = 0
          ELSE 1 END
BEGIN SELECT RAISE(ABORT, 'screenshotUrls'); END;

CREATE TRIGGER IF NOT EXISTS games_screenshots_update BEFORE UPDATE OF screenshots ON games
WHEN CASE WHEN json_valid(NEW.screenshots)
          THEN json_type(NEW.screenshots) <> 'array' OR json_array_length(NEW.screenshots) = 0
          ELSE 1 END
BEGIN SELECT RAISE(ABORT, 'screenshotUrls'); END;

CREATE TRIGGER IF NOT EXISTS games_year_insert BEFORE INSERT ON games
WHEN NEW.year < 1900
BEGIN SELECT RAISE(ABORT, 'releaseYear'); END;

CREATE TRIGGER IF NOT EXISTS games_year_update BEFORE UPDATE OF year ON games
WHEN NEW.year < 1900
BEGIN SELECT RAISE(ABORT, 'releaseYear'); END;
"#;
