use cpc_vault_lib::PlayerLaunch;

use crate::CliError;

use super::{CliContext, require_entry};

/// Print what the player widget would be handed for this entry.
pub(crate) fn run_play(ctx: &CliContext, key: &str) -> Result<(), CliError> {
    let service = ctx.service()?;
    let entry = require_entry(&service, key)?;

    let launch = PlayerLaunch::for_entry(&entry);
    let text = serde_json::to_string_pretty(&launch)
        .map_err(|e| CliError::runtime(format!("Failed to encode launch config: {}", e)))?;
    println!("{}", text);
    Ok(())
}
