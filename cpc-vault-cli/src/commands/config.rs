use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cpc_vault_lib::settings;
use cpc_vault_suggest::{ConfigSource, SuggestConfig};

use crate::CliError;

use super::CliContext;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(2) {
        Some((i, _)) => format!("{}****", &s[..i]),
        None => "****".to_string(),
    }
}

/// Where the database path was resolved from.
fn db_source(ctx: &CliContext) -> String {
    if ctx.db.is_some() {
        "--db".to_string()
    } else if std::env::var(settings::DB_ENV_VAR).is_ok_and(|v| !v.trim().is_empty()) {
        format!("env ${}", settings::DB_ENV_VAR)
    } else if settings::load_string(&settings::settings_path(), "database", "path").is_some() {
        "settings file".to_string()
    } else {
        "default".to_string()
    }
}

fn print_field(name: &str, value: Option<&str>, source: &str) {
    let source_str = format!("({})", source);
    log::info!(
        "  {} {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        match value {
            Some(v) => v.to_string(),
            None => "not set".if_supports_color(Stdout, |t| t.yellow()).to_string(),
        },
        source_str.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Show resolved settings and where each value comes from.
pub(crate) fn run_config_show(ctx: &CliContext) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "cpc-vault Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let db = ctx.db_path();
    print_field(
        "database",
        Some(db.display().to_string().as_str()),
        &db_source(ctx),
    );
    print_field(
        "year_slack",
        Some(settings::year_slack().to_string().as_str()),
        "settings file or default",
    );

    let admin = ctx.session().0.map(|s| s.identity);
    print_field(
        "admin",
        admin.as_deref(),
        if ctx.admin.is_some() {
            "--admin"
        } else {
            cpc_vault_lib::ADMIN_ENV_VAR
        },
    );

    let sources = cpc_vault_suggest::config_sources();
    match SuggestConfig::load() {
        Ok(config) => {
            print_field(
                "suggest.endpoint",
                Some(config.endpoint.as_str()),
                &sources.endpoint.to_string(),
            );
            let key = config.api_key.as_deref().map(mask_value);
            print_field("suggest.api_key", key.as_deref(), &sources.api_key.to_string());
        }
        Err(e) => {
            log::warn!("Suggestion service config is invalid: {}", e);
            if sources.endpoint != ConfigSource::Default {
                log::info!("  Fix the endpoint ({}) and try again.", sources.endpoint);
            }
        }
    }

    Ok(())
}

/// Save the given values to the settings file.
pub(crate) fn run_config_set(
    database: Option<PathBuf>,
    clear_database: bool,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<(), CliError> {
    if database.is_none() && !clear_database && endpoint.is_none() && api_key.is_none() {
        return Err(CliError::input(
            "nothing to set; pass --database, --clear-database, --endpoint or --api-key",
        ));
    }

    if database.is_some() || clear_database {
        settings::save_db_path(database.as_deref())
            .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
        match &database {
            Some(p) => log::info!("Database set to {}", p.display()),
            None => log::info!("Saved database path cleared"),
        }
    }

    if endpoint.is_some() || api_key.is_some() {
        cpc_vault_suggest::save_to_settings(endpoint, api_key)
            .map_err(|e| CliError::config(e.to_string()))?;
        if let Some(e) = endpoint {
            log::info!("Suggestion endpoint {}", if e.trim().is_empty() { "removed" } else { "saved" });
        }
        if let Some(k) = api_key {
            log::info!("Suggestion API key {}", if k.trim().is_empty() { "removed" } else { "saved" });
        }
    }

    log::info!(
        "Settings written to {}",
        settings::settings_path()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_two_chars() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }

    #[test]
    fn set_needs_something_to_save() {
        let err = run_config_set(None, false, None, None).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn database_and_clear_database_conflict() {
        use clap::Parser;
        let parsed = crate::cli_types::Cli::try_parse_from([
            "cpc-vault",
            "config",
            "set",
            "--database",
            "catalog.db",
            "--clear-database",
        ]);
        assert!(parsed.is_err());

        let parsed = crate::cli_types::Cli::try_parse_from([
            "cpc-vault",
            "config",
            "set",
            "--endpoint",
            "https://flows.example.com/f",
        ]);
        assert!(parsed.is_ok());
    }
}
