use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cpc_vault_catalog::{RawEntry, load_seed_file, normalize_key};

use crate::CliError;
use crate::cli_types::EntryArgs;

use super::{CliContext, require_entry};

/// Create an entry from form defaults (or a YAML file) plus command-line fields.
pub(crate) fn run_add(
    ctx: &CliContext,
    key: Option<String>,
    from: Option<&Path>,
    args: &EntryArgs,
) -> Result<(), CliError> {
    let service = ctx.service()?;

    let mut raw = match from {
        Some(path) => load_seed_file(path)
            .map_err(|e| CliError::input(format!("Failed to read {}: {}", path.display(), e)))?,
        None => RawEntry::form_defaults(service.rules().current_year),
    };
    args.apply(&mut raw);

    if let Some(key) = key {
        raw.key = key;
    } else if raw.key.trim().is_empty() {
        raw.key = raw.title.clone();
    }

    let created = service.create_from_raw(&raw)?;
    log::info!(
        "{} Added '{}' ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        created.key.if_supports_color(Stdout, |t| t.cyan()),
        created.title,
    );
    Ok(())
}

/// Change the given fields of an existing entry, keeping everything else.
pub(crate) fn run_edit(ctx: &CliContext, key: &str, args: &EntryArgs) -> Result<(), CliError> {
    let service = ctx.service()?;
    let existing = require_entry(&service, key)?;

    let mut raw = RawEntry::from_entry(&existing);
    args.apply(&mut raw);

    if raw == RawEntry::from_entry(&existing) {
        log::warn!("Nothing to change for '{}'", existing.key);
        return Ok(());
    }

    let updated = service.update_from_raw(&existing.key, &raw)?;
    log::info!(
        "{} Updated '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        updated.key.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_delete(ctx: &CliContext, key: &str) -> Result<(), CliError> {
    let service = ctx.service()?;
    let key = normalize_key(key);

    service.delete(&key)?;
    log::info!(
        "{} Deleted '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
