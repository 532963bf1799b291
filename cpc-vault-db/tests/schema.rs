use cpc_vault_db::schema::{CURRENT_VERSION, create_schema, get_schema_version};
use cpc_vault_db::{open_database, open_memory};
use tempfile::TempDir;

/// Schema as it stood at version 1, before `display_order` existed.
const SCHEMA_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS games (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    cover_image TEXT NOT NULL,
    screenshots TEXT NOT NULL,
    rvm_game_id TEXT NOT NULL,
    disk_url TEXT NOT NULL,
    emulator_command TEXT NOT NULL,
    genre TEXT NOT NULL,
    year INTEGER NOT NULL,
    developer TEXT NOT NULL,
    publisher TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'finished' CHECK (status IN ('finished', 'wip')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

const INSERT_GAME: &str = "INSERT INTO games (id, title, description, cover_image, screenshots, rvm_game_id,
         disk_url, emulator_command, genre, year, developer, publisher)
     VALUES (?1, 'T', 'd', 'https://a', ?2, '0', '/gamez/t.dsk', 'run\"t', 'Puzzle', ?3, 'dev', 'pub')";

fn trigger_message(result: rusqlite::Result<usize>) -> Option<String> {
    match result {
        Err(rusqlite::Error::SqliteFailure(err, message))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER =>
        {
            message
        }
        _ => None,
    }
}

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["schema_version", "games"] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn status_column_rejects_unknown_values() {
    let conn = open_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO games (id, title, description, cover_image, screenshots, rvm_game_id,
             disk_url, emulator_command, genre, year, developer, publisher, status)
         VALUES ('x', 'X', 'd', 'https://a', '[\"https://a\"]', '0', '/gamez/x.dsk',
             'run\"x', 'Puzzle', 1990, 'dev', 'pub', 'abandoned')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn open_database_creates_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("catalog.db");
    let conn = open_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn reopening_keeps_data() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO games (id, title, description, cover_image, screenshots, rvm_game_id,
                 disk_url, emulator_command, genre, year, developer, publisher)
             VALUES ('kept', 'Kept', 'd', 'https://a', '[\"https://a\"]', '0', '/gamez/k.dsk',
                 'run\"k', 'Puzzle', 1990, 'dev', 'pub')",
            [],
        )
        .unwrap();
    }
    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn migrates_v1_database_to_current() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("old.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA_V1_SQL).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .unwrap();
        conn.execute(
            "INSERT INTO games (id, title, description, cover_image, screenshots, rvm_game_id,
                 disk_url, emulator_command, genre, year, developer, publisher)
             VALUES ('old', 'Old', 'd', 'https://a', '[\"https://a\"]', '0', '/gamez/o.dsk',
                 'run\"o', 'Puzzle', 1990, 'dev', 'pub')",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let order: Option<i64> = conn
        .query_row("SELECT display_order FROM games WHERE id = 'old'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(order, None);

    // The integrity triggers arrive with the migration too.
    let rejected = conn.execute(INSERT_GAME, rusqlite::params!["Bad Key", "[\"https://a\"]", 1990]);
    assert_eq!(trigger_message(rejected).as_deref(), Some("key"));
}

#[test]
fn direct_writes_with_bad_keys_are_refused() {
    let conn = open_memory().unwrap();
    for key in ["", "Bad Key!", "UPPER", "under_score"] {
        let result = conn.execute(INSERT_GAME, rusqlite::params![key, "[\"https://a\"]", 1990]);
        assert_eq!(trigger_message(result).as_deref(), Some("key"), "key {key:?}");
    }
    conn.execute(INSERT_GAME, rusqlite::params!["ok-key-2", "[\"https://a\"]", 1990])
        .unwrap();

    let renamed = conn.execute("UPDATE games SET id = 'Not OK' WHERE id = 'ok-key-2'", []);
    assert_eq!(trigger_message(renamed).as_deref(), Some("key"));
}

#[test]
fn direct_writes_without_screenshots_are_refused() {
    let conn = open_memory().unwrap();
    for screenshots in ["[]", "not json", "{\"a\":1}"] {
        let result = conn.execute(INSERT_GAME, rusqlite::params!["t", screenshots, 1990]);
        assert_eq!(
            trigger_message(result).as_deref(),
            Some("screenshotUrls"),
            "screenshots {screenshots:?}"
        );
    }
    conn.execute(INSERT_GAME, rusqlite::params!["t", "[\"https://a\"]", 1990])
        .unwrap();

    let cleared = conn.execute("UPDATE games SET screenshots = '[]' WHERE id = 't'", []);
    assert_eq!(trigger_message(cleared).as_deref(), Some("screenshotUrls"));
}

#[test]
fn direct_writes_before_1900_are_refused() {
    let conn = open_memory().unwrap();
    let result = conn.execute(INSERT_GAME, rusqlite::params!["t", "[\"https://a\"]", 1899]);
    assert_eq!(trigger_message(result).as_deref(), Some("releaseYear"));

    conn.execute(INSERT_GAME, rusqlite::params!["t", "[\"https://a\"]", 1900])
        .unwrap();
    let backdated = conn.execute("UPDATE games SET year = 1066 WHERE id = 't'", []);
    assert_eq!(trigger_message(backdated).as_deref(), Some("releaseYear"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM games WHERE year = 1900", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_database_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("future.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    assert!(open_database(&path).is_err());
}
