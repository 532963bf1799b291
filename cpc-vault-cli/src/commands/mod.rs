pub(crate) mod config;
pub(crate) mod entry;
pub(crate) mod list;
pub(crate) mod play;
pub(crate) mod seed;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod suggest;

use std::path::PathBuf;

use cpc_vault_catalog::{CatalogEntry, ValidationRules, normalize_key};
use cpc_vault_db::SqliteStore;
use cpc_vault_lib::{CatalogService, EnvSessionGate, FixedSession, Session, SessionGate, settings};

use crate::CliError;

/// Global options shared by every command.
pub(crate) struct CliContext {
    pub db: Option<PathBuf>,
    pub admin: Option<String>,
    pub quiet: bool,
}

pub(crate) type Service = CatalogService<SqliteStore, FixedSession>;

impl CliContext {
    pub(crate) fn db_path(&self) -> PathBuf {
        settings::resolve_db_path(self.db.clone())
    }

    /// The admin session for this invocation: `--admin`, else `$CPC_VAULT_ADMIN`.
    pub(crate) fn session(&self) -> FixedSession {
        let session = match self.admin.as_deref().map(str::trim) {
            Some(identity) if !identity.is_empty() => Some(Session::new(identity)),
            _ => EnvSessionGate::new().current_session(),
        };
        FixedSession(session)
    }

    pub(crate) fn open_store(&self) -> Result<SqliteStore, CliError> {
        let path = self.db_path();
        log::debug!("Opening catalog database at {}", path.display());
        SqliteStore::open(&path).map_err(|e| {
            CliError::database(format!(
                "Failed to open catalog database {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub(crate) fn service(&self) -> Result<Service, CliError> {
        let rules = ValidationRules::with_slack(settings::year_slack());
        Ok(CatalogService::with_rules(
            self.open_store()?,
            self.session(),
            rules,
        ))
    }
}

/// Fetch the entry for a user-typed key, normalizing it first.
pub(crate) fn require_entry(service: &Service, key: &str) -> Result<CatalogEntry, CliError> {
    let normalized = normalize_key(key);
    service
        .get_by_key(&normalized)?
        .ok_or_else(|| CliError::not_found(normalized))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Forms", 10), "Forms");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_str("Gryzor (Contra)", 10), "Gryzor ...");
        assert_eq!(truncate_str("Sorcery+", 2), "So");
    }

    #[test]
    fn admin_flag_wins() {
        let ctx = CliContext {
            db: None,
            admin: Some("admin@example.com".to_string()),
            quiet: false,
        };
        let session = ctx.session().current_session().unwrap();
        assert_eq!(session.identity, "admin@example.com");
    }
}
