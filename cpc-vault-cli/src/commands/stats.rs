use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::CliContext;

pub(crate) fn run_stats(ctx: &CliContext) -> Result<(), CliError> {
    let db_path = ctx.db_path();

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'cpc-vault seed' to create one.");
        return Ok(());
    }

    let store = ctx.open_store()?;
    let stats = cpc_vault_db::catalog_stats(store.connection())
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:          {:>6}", stats.games);
    log::info!("  Finished:       {:>6}", stats.finished);
    log::info!("  In progress:    {:>6}", stats.work_in_progress);
    log::info!("  Unordered:      {:>6}", stats.unordered);
    if let (Some(first), Some(last)) = (stats.earliest_year, stats.latest_year) {
        log::info!("  Years:       {:>4}-{:<4}", first, last);
    }

    if !stats.genres.is_empty() {
        crate::log_blank();
        log::info!("{}", "Genres".if_supports_color(Stdout, |t| t.bold()));
        for (genre, count) in &stats.genres {
            log::info!("  {:<22} {:>3}", genre, count);
        }
    }

    Ok(())
}
