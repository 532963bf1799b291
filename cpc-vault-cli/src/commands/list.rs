use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cpc_vault_catalog::{CatalogEntry, GameStatus};

use crate::CliError;

use super::{CliContext, truncate_str};

pub(crate) fn run_list(
    ctx: &CliContext,
    status: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let status = status
        .map(|s| {
            GameStatus::parse(&s)
                .ok_or_else(|| CliError::input(format!("unknown status '{s}' (use finished or wip)")))
        })
        .transpose()?;

    let service = ctx.service()?;
    let conn = service.store().connection();

    let search = search.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let entries = match (search, status) {
        (Some(query), status) => {
            let mut hits = cpc_vault_db::search_games(conn, query)
                .map_err(|e| CliError::database(format!("Search failed: {}", e)))?;
            if let Some(status) = status {
                hits.retain(|e| e.status == status);
            }
            hits
        }
        (None, Some(status)) => cpc_vault_db::games_by_status(conn, status)
            .map_err(|e| CliError::database(format!("Status filter failed: {}", e)))?,
        (None, None) => service.list()?,
    };

    if json {
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::runtime(format!("Failed to encode entries: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    if entries.is_empty() {
        log::info!("No games in the catalog.");
        log::info!("Run 'cpc-vault seed' or 'cpc-vault add' to create some.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:>5}  {:<20} {:<32} {:>4}  {}", "Order", "Key", "Title", "Year", "Status")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in &entries {
        print_row(entry);
    }
    crate::log_blank();
    log::info!("{} game(s)", entries.len());

    Ok(())
}

fn print_row(entry: &CatalogEntry) {
    let order = entry
        .sort_order
        .map(|o| o.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = format!("{:<8}", entry.status.label());
    log::info!(
        "{:>5}  {} {:<32} {:>4}  {}",
        order,
        format!("{:<20}", truncate_str(&entry.key, 20)).if_supports_color(Stdout, |t| t.cyan()),
        truncate_str(&entry.title, 32),
        entry.release_year,
        match entry.status {
            GameStatus::Finished => status.if_supports_color(Stdout, |t| t.green()).to_string(),
            GameStatus::WorkInProgress => status.if_supports_color(Stdout, |t| t.yellow()).to_string(),
        },
    );
}
