//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cpc_vault_catalog::RawEntry;

#[derive(Parser)]
#[command(name = "cpc-vault")]
#[command(about = "Manage a catalog of Amstrad CPC games", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (defaults to $CPC_VAULT_DB, then settings.toml, then the data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Act as this signed-in admin (overrides $CPC_VAULT_ADMIN)
    #[arg(long, global = true, value_name = "IDENTITY")]
    pub admin: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Entry fields settable from the command line.
///
/// Anything left unset keeps its current value (edit) or form default (add).
#[derive(Args, Clone, Default)]
pub(crate) struct EntryArgs {
    /// Title shown in the catalog
    #[arg(long)]
    pub title: Option<String>,

    /// Long description
    #[arg(long)]
    pub description: Option<String>,

    /// Absolute URL of the cover image
    #[arg(long)]
    pub cover: Option<String>,

    /// Comma-separated screenshot URLs
    #[arg(long)]
    pub screenshots: Option<String>,

    /// Id from the previous hosted player
    #[arg(long)]
    pub legacy_id: Option<String>,

    /// Disk image path (e.g., /gamez/sorcery.dsk)
    #[arg(long)]
    pub media: Option<String>,

    /// Start command typed into the emulator; write \n for Enter
    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub developer: Option<String>,

    #[arg(long)]
    pub publisher: Option<String>,

    /// finished or wip
    #[arg(long)]
    pub status: Option<String>,

    /// Position in the catalog listing (empty string clears it)
    #[arg(long)]
    pub order: Option<String>,
}

impl EntryArgs {
    /// Overwrite the fields of `raw` that were given on the command line.
    pub(crate) fn apply(&self, raw: &mut RawEntry) {
        let fields: [(&Option<String>, &mut String); 13] = [
            (&self.title, &mut raw.title),
            (&self.description, &mut raw.description),
            (&self.cover, &mut raw.cover_image_url),
            (&self.screenshots, &mut raw.screenshots),
            (&self.legacy_id, &mut raw.legacy_player_id),
            (&self.media, &mut raw.media_url),
            (&self.start, &mut raw.play_command),
            (&self.genre, &mut raw.genre),
            (&self.year, &mut raw.release_year),
            (&self.developer, &mut raw.developer),
            (&self.publisher, &mut raw.publisher),
            (&self.status, &mut raw.status),
            (&self.order, &mut raw.sort_order),
        ];
        for (value, target) in fields {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog entries in display order
    List {
        /// Only entries with this status (finished, wip)
        #[arg(long)]
        status: Option<String>,

        /// Only entries whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one entry
    Show {
        key: String,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an entry (requires an admin session)
    Add {
        /// Entry key; derived from the title when omitted
        #[arg(long)]
        key: Option<String>,

        /// Start from this YAML entry file instead of the form defaults
        #[arg(long)]
        from: Option<PathBuf>,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Change fields of an entry; the key cannot change (requires an admin session)
    Edit {
        key: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete an entry (requires an admin session)
    Delete { key: String },

    /// Load YAML seed entries, skipping keys already present (requires an admin session)
    Seed {
        /// Directory of seed YAML files (default: ./catalog/games)
        dir: Option<PathBuf>,
    },

    /// Print the player launch configuration for an entry as JSON
    Play { key: String },

    /// Ask the suggestion service for games related to an entry
    Suggest {
        key: String,

        /// Flow endpoint for this run only
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Show catalog statistics
    Stats,

    /// Inspect or change settings and where each value comes from
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,
    /// Save values to the settings file
    Set {
        /// Database file to use when neither --db nor $CPC_VAULT_DB is given
        #[arg(long, value_name = "PATH", conflicts_with = "clear_database")]
        database: Option<PathBuf>,

        /// Forget the saved database file
        #[arg(long)]
        clear_database: bool,

        /// Suggestion flow endpoint (http or https); empty to remove
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Suggestion service API key; empty to remove
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
    /// Print the settings file path
    Path,
}
