//! Validation of raw form input into a [`CatalogEntryInput`].
//!
//! Validation is pure: it never consults a record store. Every failing field
//! is reported, keyed by the field it belongs to, so a form can show each
//! message next to the input that caused it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;

use crate::types::{CatalogEntryInput, GameStatus, RawEntry};

/// Earliest release year accepted.
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// Default number of years past the current one a release may be dated.
pub const DEFAULT_YEAR_SLACK: i32 = 5;

/// Fields of a catalog entry, as named in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryField {
    Key,
    Title,
    Description,
    CoverImageUrl,
    ScreenshotUrls,
    LegacyPlayerId,
    MediaUrl,
    PlayCommand,
    Genre,
    ReleaseYear,
    Developer,
    Publisher,
    Status,
    SortOrder,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Title => "title",
            Self::Description => "description",
            Self::CoverImageUrl => "coverImageUrl",
            Self::ScreenshotUrls => "screenshotUrls",
            Self::LegacyPlayerId => "legacyPlayerId",
            Self::MediaUrl => "mediaUrl",
            Self::PlayCommand => "playCommand",
            Self::Genre => "genre",
            Self::ReleaseYear => "releaseYear",
            Self::Developer => "developer",
            Self::Publisher => "publisher",
            Self::Status => "status",
            Self::SortOrder => "sortOrder",
        }
    }

    /// Look a field up by the name [`as_str`](Self::as_str) gives it.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    const ALL: [Self; 14] = [
        Self::Key,
        Self::Title,
        Self::Description,
        Self::CoverImageUrl,
        Self::ScreenshotUrls,
        Self::LegacyPlayerId,
        Self::MediaUrl,
        Self::PlayCommand,
        Self::Genre,
        Self::ReleaseYear,
        Self::Developer,
        Self::Publisher,
        Self::Status,
        Self::SortOrder,
    ];
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<EntryField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message for a field wins.
    pub fn add(&mut self, field: EntryField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: EntryField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: EntryField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = EntryField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Bounds that depend on the environment rather than on the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub current_year: i32,
    /// How many years past `current_year` a release may be dated.
    pub year_slack: i32,
}

impl ValidationRules {
    /// Rules for the current local year with the given slack.
    pub fn with_slack(year_slack: i32) -> Self {
        Self {
            current_year: chrono::Local::now().year(),
            year_slack,
        }
    }

    pub fn max_release_year(&self) -> i32 {
        self.current_year + self.year_slack
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::with_slack(DEFAULT_YEAR_SLACK)
    }
}

/// Normalize user input into an entry key.
///
/// Trims, lowercases, collapses whitespace runs into one `-`, then drops every
/// character outside `[a-z0-9-]`. `"My Game!"` becomes `"my-game"`.
pub fn normalize_key(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
    }
    out
}

/// True if `key` is already in normalized form and non-empty.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Split comma-separated URLs, trimming each and dropping empty pieces.
pub fn split_screenshots(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a raw entry.
pub fn validate(raw: &RawEntry, rules: &ValidationRules) -> Result<CatalogEntryInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let key = normalize_key(&raw.key);
    if key.is_empty() {
        errors.add(
            EntryField::Key,
            "Key is required and must contain letters, digits or hyphens",
        );
    }

    let title = required(&raw.title, EntryField::Title, "Title is required", &mut errors);
    let description = required(
        &raw.description,
        EntryField::Description,
        "Description is required",
        &mut errors,
    );

    let cover_image_url = raw.cover_image_url.trim().to_string();
    if cover_image_url.is_empty() {
        errors.add(EntryField::CoverImageUrl, "Cover image URL is required");
    } else if !is_absolute_url(&cover_image_url) {
        errors.add(
            EntryField::CoverImageUrl,
            format!("'{cover_image_url}' is not a valid absolute URL"),
        );
    }

    let screenshot_urls = split_screenshots(&raw.screenshots);
    if screenshot_urls.is_empty() {
        errors.add(
            EntryField::ScreenshotUrls,
            "At least one screenshot URL is required; separate multiple URLs with commas",
        );
    }

    let legacy_player_id = required(
        &raw.legacy_player_id,
        EntryField::LegacyPlayerId,
        "Legacy player id is required (a placeholder is fine)",
        &mut errors,
    );
    let media_url = required(
        &raw.media_url,
        EntryField::MediaUrl,
        "Media URL is required (e.g. /gamez/yourgame.dsk)",
        &mut errors,
    );
    // Opaque to us: keep it byte-for-byte, only reject blanks.
    let play_command = raw.play_command.clone();
    if play_command.trim().is_empty() {
        errors.add(EntryField::PlayCommand, "Play command is required");
    }
    let genre = required(&raw.genre, EntryField::Genre, "Genre is required", &mut errors);

    let release_year = match raw.release_year.trim().parse::<i32>() {
        Ok(year) if year < MIN_RELEASE_YEAR => {
            errors.add(
                EntryField::ReleaseYear,
                format!("Year {year} is before {MIN_RELEASE_YEAR}"),
            );
            year
        }
        Ok(year) if year > rules.max_release_year() => {
            errors.add(
                EntryField::ReleaseYear,
                format!("Year {year} is after {}", rules.max_release_year()),
            );
            year
        }
        Ok(year) => year,
        Err(_) => {
            errors.add(
                EntryField::ReleaseYear,
                format!("'{}' is not a whole number", raw.release_year.trim()),
            );
            0
        }
    };

    let developer = required(
        &raw.developer,
        EntryField::Developer,
        "Developer is required",
        &mut errors,
    );
    let publisher = required(
        &raw.publisher,
        EntryField::Publisher,
        "Publisher is required",
        &mut errors,
    );

    let status = match GameStatus::parse(&raw.status) {
        Some(s) => s,
        None => {
            errors.add(
                EntryField::Status,
                format!(
                    "'{}' is not a status; use 'finished' or 'wip'",
                    raw.status.trim()
                ),
            );
            GameStatus::default()
        }
    };

    let sort_order = match raw.sort_order.trim() {
        "" => None,
        s => match s.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                errors.add(EntryField::SortOrder, format!("'{s}' is not a whole number"));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CatalogEntryInput {
        key,
        title,
        description,
        cover_image_url,
        screenshot_urls,
        legacy_player_id,
        media_url,
        play_command,
        genre,
        release_year,
        developer,
        publisher,
        status,
        sort_order,
    })
}

/// Re-check an already built input against the write-time invariants.
///
/// [`validate`] only ever produces inputs that pass; this is for inputs
/// assembled field by field, which must not reach a record store unchecked.
pub fn check_input(input: &CatalogEntryInput, rules: &ValidationRules) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if !is_valid_key(&input.key) {
        errors.add(
            EntryField::Key,
            format!("'{}' is not a key; use lowercase letters, digits or hyphens", input.key),
        );
    }

    for (field, value) in [
        (EntryField::Title, &input.title),
        (EntryField::Description, &input.description),
        (EntryField::LegacyPlayerId, &input.legacy_player_id),
        (EntryField::MediaUrl, &input.media_url),
        (EntryField::PlayCommand, &input.play_command),
        (EntryField::Genre, &input.genre),
        (EntryField::Developer, &input.developer),
        (EntryField::Publisher, &input.publisher),
    ] {
        if value.trim().is_empty() {
            errors.add(field, format!("{field} is required"));
        }
    }

    if !is_absolute_url(&input.cover_image_url) {
        errors.add(
            EntryField::CoverImageUrl,
            format!("'{}' is not a valid absolute URL", input.cover_image_url),
        );
    }

    if input.screenshot_urls.is_empty() {
        errors.add(EntryField::ScreenshotUrls, "At least one screenshot URL is required");
    } else if input.screenshot_urls.iter().any(|u| u.trim().is_empty()) {
        errors.add(EntryField::ScreenshotUrls, "Screenshot URLs must not be blank");
    }

    let year = input.release_year;
    if year < MIN_RELEASE_YEAR {
        errors.add(
            EntryField::ReleaseYear,
            format!("Year {year} is before {MIN_RELEASE_YEAR}"),
        );
    } else if year > rules.max_release_year() {
        errors.add(
            EntryField::ReleaseYear,
            format!("Year {year} is after {}", rules.max_release_year()),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn required(value: &str, field: EntryField, message: &str, errors: &mut FieldErrors) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

fn is_absolute_url(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(u) => u.has_host(),
        Err(_) => false,
    }
}
