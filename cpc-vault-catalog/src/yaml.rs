//! YAML loading for human-curated seed entries.
//!
//! A seed directory holds one `.yaml` file per game, each deserializing to a
//! [`RawEntry`]. Entries are returned unvalidated; seeding runs them through
//! the same validation as any other write.

use crate::types::RawEntry;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Load every seed entry from `dir`, sorted by file name.
///
/// A missing directory yields an empty list; a path that exists but is not a
/// directory is an error.
pub fn load_seed_entries(dir: &Path) -> Result<Vec<RawEntry>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut items = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        items.push(load_seed_file(&entry.path())?);
    }

    Ok(items)
}

/// Load a single seed entry file.
pub fn load_seed_file(path: &Path) -> Result<RawEntry, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
