use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{CliContext, require_entry};

pub(crate) fn run_show(ctx: &CliContext, key: &str, json: bool) -> Result<(), CliError> {
    let service = ctx.service()?;
    let entry = require_entry(&service, key)?;

    if json {
        let text = serde_json::to_string_pretty(&entry)
            .map_err(|e| CliError::runtime(format!("Failed to encode entry: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    log::info!("{}", entry.title.if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} ({})",
        entry.developer,
        entry.release_year,
        entry.publisher
    );
    crate::log_blank();
    log::info!("{}", entry.description);
    crate::log_blank();

    let order = entry
        .sort_order
        .map(|o| o.to_string())
        .unwrap_or_else(|| "unset".to_string());
    let fields: [(&str, String); 9] = [
        ("Key", entry.key.clone()),
        ("Genre", entry.genre.clone()),
        ("Status", entry.status.label().to_string()),
        ("Order", order),
        ("Cover", entry.cover_image_url.clone()),
        ("Media", entry.media_url.clone()),
        ("Command", entry.play_command.clone()),
        ("Legacy id", entry.legacy_player_id.clone()),
        ("Updated", entry.updated_at.clone()),
    ];
    for (name, value) in fields {
        log::info!(
            "  {} {}",
            format!("{:<10}", format!("{}:", name)).if_supports_color(Stdout, |t| t.cyan()),
            value
        );
    }

    log::info!(
        "  {}",
        format!("{:<10}", "Shots:").if_supports_color(Stdout, |t| t.cyan())
    );
    for url in &entry.screenshot_urls {
        log::info!("    {}", url);
    }

    Ok(())
}
