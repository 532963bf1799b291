use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cpc_vault_suggest::{GenkitSuggestClient, RelatedGames, SuggestConfig, fetch_related};

use crate::CliError;
use crate::spinner;

use super::{CliContext, require_entry};

/// Show games related to an entry. Service failures are reported, not fatal.
pub(crate) fn run_suggest(
    ctx: &CliContext,
    key: &str,
    endpoint: Option<String>,
) -> Result<(), CliError> {
    let service = ctx.service()?;
    let entry = require_entry(&service, key)?;

    let config = SuggestConfig::load()
        .and_then(|c| c.with_overrides(endpoint, None))
        .map_err(|e| CliError::config(e.to_string()))?;
    let client = GenkitSuggestClient::new(config)
        .map_err(|e| CliError::runtime(format!("Failed to create HTTP client: {}", e)))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    let pb = spinner::start(format!("Asking {} ...", client.endpoint()), ctx.quiet);
    let related = rt.block_on(fetch_related(&client, &entry.title));
    pb.finish_and_clear();

    log::info!(
        "{} {}",
        "You might also like, after".if_supports_color(Stdout, |t| t.bold()),
        entry.title.if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    match related {
        RelatedGames::Loaded(games) => {
            for game in &games {
                log::info!("  {}", game.title.if_supports_color(Stdout, |t| t.bold()));
                if !game.description.is_empty() {
                    log::info!("    {}", game.description);
                }
            }
        }
        RelatedGames::Empty => {
            log::info!(
                "  {}",
                "No suggestions this time.".if_supports_color(Stdout, |t| t.dimmed())
            );
        }
        RelatedGames::Failed(message) => {
            log::warn!(
                "{} Suggestions unavailable: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                message,
            );
        }
    }

    Ok(())
}
