//! The catalog service: validated, gated access to a record store.
//!
//! Reads go straight to the store. Writes first require an admin session,
//! then (for raw input) validation, then one conditional store write. The
//! service keeps no state of its own between calls.

use cpc_vault_catalog::{
    CatalogEntry, CatalogEntryInput, RawEntry, RecordStore, ValidationRules, check_input,
    validate,
};

use crate::error::CatalogError;
use crate::session::{Session, SessionGate};

/// Catalog operations over an injected store and session gate.
pub struct CatalogService<S, G> {
    store: S,
    gate: G,
    rules: ValidationRules,
}

impl<S: RecordStore, G: SessionGate> CatalogService<S, G> {
    pub fn new(store: S, gate: G) -> Self {
        Self::with_rules(store, gate, ValidationRules::default())
    }

    pub fn with_rules(store: S, gate: G, rules: ValidationRules) -> Self {
        Self { store, gate, rules }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Every entry, ordered by sort order (absent last) then title.
    pub fn list(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.store.select_all_ordered()?)
    }

    /// The entry with `key`. A missing entry is `Ok(None)`, not an error.
    pub fn get_by_key(&self, key: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.store.select_by_key(key)?)
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Create an entry from already-validated input.
    ///
    /// The input is checked again, so a hand-built input that breaks an
    /// invariant fails with [`CatalogError::ValidationFailed`].
    pub fn create(&self, input: &CatalogEntryInput) -> Result<CatalogEntry, CatalogError> {
        let session = self.require_session()?;
        check_input(input, &self.rules)?;

        // Friendlier early answer; the store's unique constraint is what actually decides.
        if self.store.select_by_key(&input.key)?.is_some() {
            return Err(CatalogError::DuplicateKey(input.key.clone()));
        }

        let entry = self.store.insert_unique(input)?;
        log::info!("{} created '{}' ({})", session.identity, entry.key, entry.title);
        Ok(entry)
    }

    /// Validate raw form input, then create.
    pub fn create_from_raw(&self, raw: &RawEntry) -> Result<CatalogEntry, CatalogError> {
        self.require_session()?;
        let input = validate(raw, &self.rules)?;
        self.create(&input)
    }

    /// Replace every field of the entry at `key` except the key.
    ///
    /// `key` is authoritative: whatever `input.key` says is ignored.
    pub fn update(&self, key: &str, input: &CatalogEntryInput) -> Result<CatalogEntry, CatalogError> {
        let session = self.require_session()?;

        if input.key != key {
            log::debug!(
                "Ignoring key '{}' in update input; entry keys are immutable",
                input.key
            );
        }
        check_input(
            &CatalogEntryInput {
                key: key.to_string(),
                ..input.clone()
            },
            &self.rules,
        )?;

        let entry = self.store.update_by_key(key, input)?;
        log::info!("{} updated '{}'", session.identity, entry.key);
        Ok(entry)
    }

    /// Validate raw form input, then update the entry at `key`.
    pub fn update_from_raw(&self, key: &str, raw: &RawEntry) -> Result<CatalogEntry, CatalogError> {
        self.require_session()?;
        // The form's key field is irrelevant for an update; validate against the real one.
        let raw = RawEntry {
            key: key.to_string(),
            ..raw.clone()
        };
        let input = validate(&raw, &self.rules)?;
        self.update(key, &input)
    }

    /// Delete the entry at `key`. Deleting a missing key is [`CatalogError::NotFound`].
    pub fn delete(&self, key: &str) -> Result<(), CatalogError> {
        let session = self.require_session()?;
        self.store.delete_by_key(key)?;
        log::info!("{} deleted '{}'", session.identity, key);
        Ok(())
    }

    /// Create every seed entry that is valid and not already present.
    ///
    /// Individual failures are counted and logged rather than aborting the
    /// run; only a missing session or an unavailable store stops it.
    pub fn seed(&self, entries: &[RawEntry]) -> Result<SeedStats, CatalogError> {
        self.require_session()?;

        let mut stats = SeedStats::default();
        for raw in entries {
            match self.create_from_raw(raw) {
                Ok(entry) => {
                    log::debug!("Seeded '{}'", entry.key);
                    stats.created += 1;
                }
                Err(CatalogError::DuplicateKey(key)) => {
                    log::debug!("Skipping '{}': already in the catalog", key);
                    stats.existing += 1;
                }
                Err(CatalogError::ValidationFailed(errors)) => {
                    log::warn!("Skipping seed entry '{}': {}", raw.key.trim(), errors);
                    stats.invalid += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stats)
    }

    fn require_session(&self) -> Result<Session, CatalogError> {
        self.gate.current_session().ok_or(CatalogError::Unauthenticated)
    }
}

/// Outcome counts from [`CatalogService::seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub created: usize,
    /// Already present, left untouched.
    pub existing: usize,
    pub invalid: usize,
}
