//! Data model types for the game catalog.
//!
//! A catalog holds one kind of record: a game entry pointing at a disk image
//! that the player widget can boot. Entries move through three shapes:
//! [`RawEntry`] (untyped form input), [`CatalogEntryInput`] (validated, ready
//! to persist) and [`CatalogEntry`] (a stored row with server timestamps).

use serde::{Deserialize, Deserializer, Serialize};

// ── Status ──────────────────────────────────────────────────────────────────

/// Development status of a game. Opaque business data: it gates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "wip")]
    WorkInProgress,
}

impl GameStatus {
    /// The value stored in the `games.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::WorkInProgress => "wip",
        }
    }

    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Finished => "Finished",
            Self::WorkInProgress => "WIP",
        }
    }

    /// Parse a status from form input or a database column.
    ///
    /// Accepts `finished`, `wip`, `workInProgress` and `work-in-progress`,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "finished" => Some(Self::Finished),
            "wip" | "workinprogress" | "work-in-progress" | "work_in_progress" => {
                Some(Self::WorkInProgress)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Raw form input ──────────────────────────────────────────────────────────

/// An untyped entry exactly as it arrives from a form, a CLI invocation, or a
/// seed YAML file. Nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    /// Comma-separated screenshot URLs. Seed files may give a YAML list instead.
    #[serde(deserialize_with = "string_or_list")]
    pub screenshots: String,
    pub legacy_player_id: String,
    pub media_url: String,
    pub play_command: String,
    pub genre: String,
    #[serde(deserialize_with = "scalar_string")]
    pub release_year: String,
    pub developer: String,
    pub publisher: String,
    pub status: String,
    /// Blank means "no explicit position".
    #[serde(deserialize_with = "scalar_string")]
    pub sort_order: String,
}

impl RawEntry {
    /// Blank form prefilled with the placeholder values an admin starts from.
    pub fn form_defaults(current_year: i32) -> Self {
        Self {
            cover_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            screenshots: PLACEHOLDER_IMAGE_URL.to_string(),
            legacy_player_id: "00000".to_string(),
            media_url: "/gamez/".to_string(),
            play_command: r#"run"disc\n"#.to_string(),
            release_year: current_year.to_string(),
            status: GameStatus::Finished.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Turn a stored entry back into form input, e.g. to prefill an edit form.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            key: entry.key.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            cover_image_url: entry.cover_image_url.clone(),
            screenshots: entry.screenshot_urls.join(", "),
            legacy_player_id: entry.legacy_player_id.clone(),
            media_url: entry.media_url.clone(),
            play_command: entry.play_command.clone(),
            genre: entry.genre.clone(),
            release_year: entry.release_year.to_string(),
            developer: entry.developer.clone(),
            publisher: entry.publisher.clone(),
            status: entry.status.as_str().to_string(),
            sort_order: entry.sort_order.map(|o| o.to_string()).unwrap_or_default(),
        }
    }
}

/// Accept any YAML/JSON scalar where form text is expected, so seed files can
/// write `release_year: 1987` rather than `release_year: "1987"`.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
    })
}

fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => String::new(),
        Some(OneOrMany::One(s)) => s,
        Some(OneOrMany::Many(v)) => v.join(", "),
    })
}

/// Image used when an entry has no real artwork yet.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x300.png";

// ── Validated input ─────────────────────────────────────────────────────────

/// A fully validated entry, ready to be written to a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryInput {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    pub screenshot_urls: Vec<String>,
    /// Id from the previous hosted player. Kept for compatibility only.
    pub legacy_player_id: String,
    pub media_url: String,
    /// Stored verbatim, including any escaped `\n` tokens.
    pub play_command: String,
    pub genre: String,
    pub release_year: i32,
    pub developer: String,
    pub publisher: String,
    pub status: GameStatus,
    pub sort_order: Option<i64>,
}

// ── Stored entry ────────────────────────────────────────────────────────────

/// A catalog entry as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    pub screenshot_urls: Vec<String>,
    pub legacy_player_id: String,
    pub media_url: String,
    pub play_command: String,
    pub genre: String,
    pub release_year: i32,
    pub developer: String,
    pub publisher: String,
    pub status: GameStatus,
    pub sort_order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl CatalogEntry {
    /// Strip server-assigned fields, leaving the values a writer supplied.
    pub fn to_input(&self) -> CatalogEntryInput {
        CatalogEntryInput {
            key: self.key.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image_url: self.cover_image_url.clone(),
            screenshot_urls: self.screenshot_urls.clone(),
            legacy_player_id: self.legacy_player_id.clone(),
            media_url: self.media_url.clone(),
            play_command: self.play_command.clone(),
            genre: self.genre.clone(),
            release_year: self.release_year,
            developer: self.developer.clone(),
            publisher: self.publisher.clone(),
            status: self.status,
            sort_order: self.sort_order,
        }
    }
}
