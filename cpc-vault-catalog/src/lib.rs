//! Game catalog data model, validation, and the record store contract.
//!
//! This crate defines the catalog entry types and the rules that turn raw form
//! input into a storable entry, without any database dependencies. Consumers
//! implement [`RecordStore`] (see `cpc-vault-db`) and drive it through the
//! catalog service in `cpc-vault-lib`.

pub mod store;
pub mod types;
pub mod validate;
pub mod yaml;

pub use store::{RecordStore, StoreError};
pub use types::*;
pub use validate::{
    DEFAULT_YEAR_SLACK, EntryField, FieldErrors, MIN_RELEASE_YEAR, ValidationRules, check_input,
    is_valid_key, normalize_key, split_screenshots, validate,
};
pub use yaml::{YamlError, load_seed_entries, load_seed_file};
