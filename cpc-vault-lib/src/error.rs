use cpc_vault_catalog::{FieldErrors, StoreError};
use thiserror::Error;

/// Errors returned by catalog service operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input failed validation; nothing was written
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// An entry with this key already exists
    #[error("An entry with key '{0}' already exists")]
    DuplicateKey(String),

    /// No entry has this key
    #[error("No entry with key '{0}'")]
    NotFound(String),

    /// A write was attempted without an admin session
    #[error("Not signed in: catalog changes require an admin session")]
    Unauthenticated,

    /// The record store failed; the message is passed through as reported
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey(key) => Self::DuplicateKey(key),
            StoreError::NotFound(key) => Self::NotFound(key),
            StoreError::Rejected { field, .. } => {
                let mut errors = FieldErrors::new();
                errors.add(field, "Rejected by the record store");
                Self::ValidationFailed(errors)
            }
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(e: FieldErrors) -> Self {
        Self::ValidationFailed(e)
    }
}

impl CatalogError {
    /// The field errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}
