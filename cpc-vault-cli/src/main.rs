//! cpc-vault CLI
//!
//! Command-line interface for the Amstrad CPC game catalog.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        if let CliError::Catalog(ref catalog_err) = e {
            if let Some(fields) = catalog_err.field_errors() {
                for (field, message) in fields.iter() {
                    log::error!("  {}: {}", field, message);
                }
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = commands::CliContext {
        db: cli.db,
        admin: cli.admin,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::List {
            status,
            search,
            json,
        } => commands::list::run_list(&ctx, status, search, json),
        Commands::Show { key, json } => commands::show::run_show(&ctx, &key, json),
        Commands::Add { key, from, entry } => {
            commands::entry::run_add(&ctx, key, from.as_deref(), &entry)
        }
        Commands::Edit { key, entry } => commands::entry::run_edit(&ctx, &key, &entry),
        Commands::Delete { key } => commands::entry::run_delete(&ctx, &key),
        Commands::Seed { dir } => commands::seed::run_seed(&ctx, dir),
        Commands::Play { key } => commands::play::run_play(&ctx, &key),
        Commands::Suggest { key, endpoint } => {
            commands::suggest::run_suggest(&ctx, &key, endpoint)
        }
        Commands::Stats => commands::stats::run_stats(&ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Set {
                database,
                clear_database,
                endpoint,
                api_key,
            } => commands::config::run_config_set(
                database,
                clear_database,
                endpoint.as_deref(),
                api_key.as_deref(),
            ),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Route `log` output to the terminal.
///
/// Info lines are the command's normal output and print bare; warnings and
/// errors get a colored level prefix. `--verbose` adds timestamps and debug
/// lines from every crate, `--quiet` keeps only warnings and errors.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    builder.format(move |buf, record| {
        if verbose {
            write!(buf, "[{} {:<5}] ", buf.timestamp_seconds(), record.level())?;
        } else {
            match record.level() {
                log::Level::Error => write!(
                    buf,
                    "{} ",
                    "error:".if_supports_color(Stderr, |t| t.red())
                )?,
                log::Level::Warn => write!(
                    buf,
                    "{} ",
                    "warning:".if_supports_color(Stderr, |t| t.yellow())
                )?,
                _ => {}
            }
        }
        writeln!(buf, "{}", record.args())
    });

    builder.init();
}

/// Print an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}
