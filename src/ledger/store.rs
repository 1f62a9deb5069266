//! Ledger storage collaborator.
//!
//! Entries are stored individually under `(employee_id, entry_id)`.
//! There is no operation that rewrites an employee's whole ledger, so two
//! operators editing different entries of the same employee never
//! overwrite each other.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::LedgerEntry;

/// Keyed, per-entry ledger storage.
pub trait LedgerStore: Send + Sync {
    /// Returns every entry for the employee, voided ones included,
    /// ordered by date then creation time.
    fn load(&self, employee_id: &str) -> EngineResult<Vec<LedgerEntry>>;

    /// Returns one entry.
    fn get(&self, employee_id: &str, entry_id: Uuid) -> EngineResult<LedgerEntry>;

    /// Adds a new entry. Fails if the key is already taken.
    fn insert(&self, entry: LedgerEntry) -> EngineResult<()>;

    /// Atomically mutates one entry.
    ///
    /// `apply` runs against a copy of the stored entry; the copy replaces
    /// the stored entry only if `apply` succeeds.
    fn update(
        &self,
        employee_id: &str,
        entry_id: Uuid,
        apply: &mut dyn FnMut(&mut LedgerEntry) -> EngineResult<()>,
    ) -> EngineResult<LedgerEntry>;
}

/// In-process ledger keyed by `(employee_id, entry_id)`.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    entries: RwLock<HashMap<(String, Uuid), LedgerEntry>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self, employee_id: &str) -> EngineResult<Vec<LedgerEntry>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut ledger: Vec<LedgerEntry> = entries
            .values()
            .filter(|entry| entry.employee_id == employee_id)
            .cloned()
            .collect();
        ledger.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(ledger)
    }

    fn get(&self, employee_id: &str, entry_id: Uuid) -> EngineResult<LedgerEntry> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        entries
            .get(&(employee_id.to_string(), entry_id))
            .cloned()
            .ok_or_else(|| EngineError::EntryNotFound {
                employee_id: employee_id.to_string(),
                entry_id,
            })
    }

    fn insert(&self, entry: LedgerEntry) -> EngineResult<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let key = (entry.employee_id.clone(), entry.id);
        if entries.contains_key(&key) {
            return Err(EngineError::DuplicateEntry { entry_id: entry.id });
        }
        entries.insert(key, entry);
        Ok(())
    }

    fn update(
        &self,
        employee_id: &str,
        entry_id: Uuid,
        apply: &mut dyn FnMut(&mut LedgerEntry) -> EngineResult<()>,
    ) -> EngineResult<LedgerEntry> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let stored = entries
            .get_mut(&(employee_id.to_string(), entry_id))
            .ok_or_else(|| EngineError::EntryNotFound {
                employee_id: employee_id.to_string(),
                entry_id,
            })?;

        let mut candidate = stored.clone();
        apply(&mut candidate)?;
        *stored = candidate.clone();

        Ok(candidate)
    }
}
