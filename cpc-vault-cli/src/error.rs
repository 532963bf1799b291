use thiserror::Error;

use cpc_vault_lib::CatalogError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog service rejected the operation
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Requested entry does not exist
    #[error("No entry with key '{0}'")]
    NotFound(String),

    /// Bad command-line input
    #[error("Invalid input: {0}")]
    Input(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
