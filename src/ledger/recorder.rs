//! Ledger entry validation and mutation.
//!
//! The recorder is the only component that changes a ledger. It turns a
//! raw [`LedgerEntryDraft`] into a typed [`LedgerEntry`], rejecting bad
//! input instead of coercing it, and edits or voids single entries by id.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::info;
use uuid::Uuid;

use crate::calculation::resolve_track;
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeePolicyProfile, LedgerEntry, LedgerEntryDraft, LedgerEntryPatch, LedgerEntryType,
    normalize_date,
};

use super::store::LedgerStore;

/// Validates a raw amount for the given entry type.
///
/// Non-finite numbers are rejected. PTO and Sick debits must be strictly
/// positive; comp time and adjustments are signed but must be non-zero.
///
/// # Examples
///
/// ```
/// use leave_engine::ledger::validate_amount;
/// use leave_engine::models::LedgerEntryType;
/// use rust_decimal::Decimal;
///
/// assert_eq!(validate_amount(LedgerEntryType::Pto, 1.5).unwrap(), Decimal::new(15, 1));
/// assert!(validate_amount(LedgerEntryType::Pto, -1.0).is_err());
/// assert!(validate_amount(LedgerEntryType::PtoAdjustment, -1.0).is_ok());
/// assert!(validate_amount(LedgerEntryType::Sick, f64::NAN).is_err());
/// ```
pub fn validate_amount(entry_type: LedgerEntryType, amount: f64) -> EngineResult<Decimal> {
    if !amount.is_finite() {
        return Err(invalid_amount("must be a finite number"));
    }
    let amount = Decimal::from_f64(amount)
        .ok_or_else(|| invalid_amount("is outside the representable range"))?;
    check_amount_sign(entry_type, amount)?;
    Ok(amount)
}

fn check_amount_sign(entry_type: LedgerEntryType, amount: Decimal) -> EngineResult<()> {
    if entry_type.is_debit() && amount <= Decimal::ZERO {
        return Err(invalid_amount(&format!(
            "{} entries must be greater than zero",
            entry_type
        )));
    }
    if amount.is_zero() {
        return Err(invalid_amount("must not be zero"));
    }
    Ok(())
}

fn invalid_amount(message: &str) -> EngineError {
    EngineError::InvalidLedgerEntry {
        field: "amount".to_string(),
        message: message.to_string(),
    }
}

/// Validates and applies ledger mutations.
#[derive(Clone)]
pub struct LedgerEntryRecorder {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl LedgerEntryRecorder {
    /// Creates a recorder writing to `store` and stamping times from `clock`.
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Validates `draft` and appends it to the employee's ledger.
    pub fn record(
        &self,
        profile: &EmployeePolicyProfile,
        draft: LedgerEntryDraft,
        actor: &str,
    ) -> EngineResult<LedgerEntry> {
        let date = normalize_date(&draft.date)?;
        let entry_type = LedgerEntryType::from_str(&draft.entry_type)?;
        let amount = validate_amount(entry_type, draft.amount)?;
        let track = resolve_track(profile, date, draft.track)?;

        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            employee_id: profile.employee_id.clone(),
            date,
            entry_type,
            amount,
            note: draft.note,
            track,
            created_at: self.clock.now(),
            created_by: actor.to_string(),
            last_modified_at: None,
            last_modified_by: None,
            voided_at: None,
            voided_by: None,
        };

        self.store.insert(entry.clone())?;

        info!(
            employee_id = %entry.employee_id,
            entry_id = %entry.id,
            entry_type = %entry.entry_type,
            amount = %entry.amount,
            date = %entry.date,
            actor = %actor,
            "Recorded ledger entry"
        );

        Ok(entry)
    }

    /// Applies `patch` to one entry.
    ///
    /// `created_at` and `created_by` are preserved; the edit is stamped
    /// with `last_modified_at` and `last_modified_by`. The patched entry is
    /// validated as a whole, so changing only the type re-checks the
    /// existing amount against the new type.
    pub fn edit(
        &self,
        profile: &EmployeePolicyProfile,
        entry_id: Uuid,
        patch: LedgerEntryPatch,
        actor: &str,
    ) -> EngineResult<LedgerEntry> {
        let new_date = patch.date.as_ref().map(normalize_date).transpose()?;
        let new_type = patch
            .entry_type
            .as_deref()
            .map(LedgerEntryType::from_str)
            .transpose()?;
        if patch.amount.is_some_and(|amount| !amount.is_finite()) {
            return Err(invalid_amount("must be a finite number"));
        }
        let now = self.clock.now();

        let updated = self
            .store
            .update(&profile.employee_id, entry_id, &mut |entry| {
                if !entry.is_active() {
                    return Err(EngineError::EntryVoided { entry_id: entry.id });
                }

                let entry_type = new_type.unwrap_or(entry.entry_type);
                let amount = match patch.amount {
                    Some(raw) => validate_amount(entry_type, raw)?,
                    None => {
                        check_amount_sign(entry_type, entry.amount)?;
                        entry.amount
                    }
                };
                let date = new_date.unwrap_or(entry.date);
                // A stored track only sticks while the entry stays in its year.
                let requested = match patch.track {
                    Some(track) => Some(track),
                    None if date.year() == entry.date.year() => Some(entry.track),
                    None => None,
                };
                let track = resolve_track(profile, date, requested)?;

                entry.date = date;
                entry.entry_type = entry_type;
                entry.amount = amount;
                entry.track = track;
                if let Some(note) = &patch.note {
                    entry.note = note.clone();
                }
                entry.last_modified_at = Some(now);
                entry.last_modified_by = Some(actor.to_string());
                Ok(())
            })?;

        info!(
            employee_id = %updated.employee_id,
            entry_id = %updated.id,
            entry_type = %updated.entry_type,
            amount = %updated.amount,
            actor = %actor,
            "Edited ledger entry"
        );

        Ok(updated)
    }

    /// Voids one entry.
    ///
    /// The entry stays in the ledger for audit and is ignored by every
    /// computation from then on. Voiding twice is an error.
    pub fn void(&self, employee_id: &str, entry_id: Uuid, actor: &str) -> EngineResult<LedgerEntry> {
        let now = self.clock.now();

        let voided = self.store.update(employee_id, entry_id, &mut |entry| {
            if !entry.is_active() {
                return Err(EngineError::EntryVoided { entry_id: entry.id });
            }
            entry.voided_at = Some(now);
            entry.voided_by = Some(actor.to_string());
            Ok(())
        })?;

        info!(
            employee_id = %employee_id,
            entry_id = %entry_id,
            actor = %actor,
            "Voided ledger entry"
        );

        Ok(voided)
    }
}
