//! The record store contract.
//!
//! A record store persists [`CatalogEntry`] rows addressed by key. It is the
//! only place catalog state lives; services hold a store, never a collection
//! of their own. Each write is a single conditional operation, and the store's
//! own uniqueness constraint on the key is what prevents duplicate inserts.

use thiserror::Error;

use crate::types::{CatalogEntry, CatalogEntryInput};
use crate::validate::EntryField;

/// Failures reported by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert hit the key uniqueness constraint.
    #[error("an entry with key '{0}' already exists")]
    DuplicateKey(String),

    /// A conditional update or delete matched no row.
    #[error("no entry with key '{0}'")]
    NotFound(String),

    /// The store's own integrity rules refused the record.
    #[error("entry '{key}' rejected by the record store: invalid {field}")]
    Rejected { key: String, field: EntryField },

    /// The backend itself failed; the message is passed through untouched.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence backend for catalog entries.
pub trait RecordStore {
    /// Every entry, ordered by sort order (absent last) then title.
    fn select_all_ordered(&self) -> Result<Vec<CatalogEntry>, StoreError>;

    /// The entry with `key`, if any.
    fn select_by_key(&self, key: &str) -> Result<Option<CatalogEntry>, StoreError>;

    /// Insert a new entry. Fails with [`StoreError::DuplicateKey`] if the key is taken.
    ///
    /// Stores should refuse records that break the key, screenshot or year
    /// invariants with [`StoreError::Rejected`].
    fn insert_unique(&self, input: &CatalogEntryInput) -> Result<CatalogEntry, StoreError>;

    /// Replace every field of the entry at `key` except the key itself.
    ///
    /// `input.key` is ignored. Fails with [`StoreError::NotFound`] if no row matched.
    fn update_by_key(
        &self,
        key: &str,
        input: &CatalogEntryInput,
    ) -> Result<CatalogEntry, StoreError>;

    /// Delete the entry at `key`. Fails with [`StoreError::NotFound`] if no row matched.
    fn delete_by_key(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn select_all_ordered(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        (**self).select_all_ordered()
    }

    fn select_by_key(&self, key: &str) -> Result<Option<CatalogEntry>, StoreError> {
        (**self).select_by_key(key)
    }

    fn insert_unique(&self, input: &CatalogEntryInput) -> Result<CatalogEntry, StoreError> {
        (**self).insert_unique(input)
    }

    fn update_by_key(
        &self,
        key: &str,
        input: &CatalogEntryInput,
    ) -> Result<CatalogEntry, StoreError> {
        (**self).update_by_key(key, input)
    }

    fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_by_key(key)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn select_all_ordered(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        (**self).select_all_ordered()
    }

    fn select_by_key(&self, key: &str) -> Result<Option<CatalogEntry>, StoreError> {
        (**self).select_by_key(key)
    }

    fn insert_unique(&self, input: &CatalogEntryInput) -> Result<CatalogEntry, StoreError> {
        (**self).insert_unique(input)
    }

    fn update_by_key(
        &self,
        key: &str,
        input: &CatalogEntryInput,
    ) -> Result<CatalogEntry, StoreError> {
        (**self).update_by_key(key, input)
    }

    fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_by_key(key)
    }
}
