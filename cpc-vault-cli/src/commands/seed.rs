use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::CliContext;

/// Default directory of seed YAML files, relative to the current directory.
pub(crate) fn default_seed_dir() -> PathBuf {
    PathBuf::from("catalog").join("games")
}

pub(crate) fn run_seed(ctx: &CliContext, dir: Option<PathBuf>) -> Result<(), CliError> {
    let dir = dir.unwrap_or_else(default_seed_dir);
    let entries = cpc_vault_catalog::load_seed_entries(&dir)
        .map_err(|e| CliError::input(format!("Failed to load seed files: {}", e)))?;

    if entries.is_empty() {
        log::warn!("No seed entries found in {}", dir.display());
        return Ok(());
    }

    let service = ctx.service()?;
    log::info!(
        "Seeding {} entr{} from {}",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        dir.display()
    );

    let stats = service.seed(&entries)?;

    crate::log_blank();
    log::info!(
        "  {} {}",
        "Created:".if_supports_color(Stdout, |t| t.green()),
        stats.created
    );
    log::info!(
        "  {} {}",
        "Existing:".if_supports_color(Stdout, |t| t.dimmed()),
        stats.existing
    );
    if stats.invalid > 0 {
        log::info!(
            "  {} {}",
            "Invalid:".if_supports_color(Stdout, |t| t.red()),
            stats.invalid
        );
    }

    Ok(())
}
