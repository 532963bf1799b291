//! Shared application settings (database path, validation slack, config file location).
//!
//! Every frontend goes through these functions so the settings file is always
//! `~/.config/cpc-vault/settings.toml` and database-path resolution is
//! consistent.

use std::io;
use std::path::{Path, PathBuf};

use cpc_vault_catalog::DEFAULT_YEAR_SLACK;

/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "CPC_VAULT_DB";

/// File name of the catalog database inside the data directory.
pub const DEFAULT_DB_FILE: &str = "catalog.db";

/// Canonical path to the shared settings file: `~/.config/cpc-vault/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cpc-vault").join("settings.toml")
}

/// Default database location: `<data dir>/cpc-vault/catalog.db`.
pub fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("cpc-vault").join(DEFAULT_DB_FILE)
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `CPC_VAULT_DB` environment variable
/// 3. Saved `database.path` in `settings.toml`
/// 4. [`default_db_path`]
pub fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = non_empty_env(DB_ENV_VAR) {
        return PathBuf::from(p);
    }
    if let Some(p) = load_string(&settings_path(), "database", "path") {
        return PathBuf::from(p);
    }
    default_db_path()
}

/// Years past the current one that a release year may reach.
///
/// Reads `catalog.year_slack` from `settings.toml`, falling back to the default.
pub fn year_slack() -> i32 {
    year_slack_from(&settings_path())
}

fn year_slack_from(path: &Path) -> i32 {
    load_doc(path)
        .and_then(|doc| {
            doc.get("catalog")?
                .get("year_slack")?
                .as_integer()
                .and_then(|n| i32::try_from(n).ok())
        })
        .filter(|n| *n >= 0)
        .unwrap_or(DEFAULT_YEAR_SLACK)
}

/// Read a string value from `[section] key` in the settings file at `path`.
///
/// Blank values count as unset.
pub fn load_string(path: &Path, section: &str, key: &str) -> Option<String> {
    let doc = load_doc(path)?;
    let value = doc.get(section)?.get(key)?.as_str()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Save (or clear) the database path in `settings.toml`.
pub fn save_db_path(path: Option<&Path>) -> io::Result<()> {
    save_string(
        &settings_path(),
        "database",
        "path",
        path.map(|p| p.to_string_lossy().into_owned()),
    )
}

/// Set (or remove) `[section] key` in the settings file at `path`.
///
/// Uses `toml::Value` for a surgical update so unrelated sections are
/// preserved. The file is written atomically.
pub fn save_string(path: &Path, section: &str, key: &str, value: Option<String>) -> io::Result<()> {
    let mut doc = load_doc(path).unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section_value = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = section_value
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(v) => {
            section_table.insert(key.to_string(), toml::Value::String(v));
        }
        None => {
            section_table.remove(key);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

fn load_doc(path: &Path) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    contents.parse().ok()
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
