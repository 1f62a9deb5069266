//! Request types for the leave engine API.
//!
//! The stateless endpoints (`/allowance`, `/carryover`, `/balance`) take
//! everything they need in the body. The employee endpoints read the
//! profile and ledger from the engine's collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    DateInput, EmployeePolicyProfile, LeaveTrack, LedgerEntry, LedgerEntryDraft, LedgerEntryPatch,
};

/// Request body for `POST /allowance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceRequest {
    /// The employee's policy profile.
    pub profile: EmployeePolicyProfile,
    /// The reporting year.
    pub year: i32,
    /// Evaluation date. Defaults to today.
    #[serde(default)]
    pub as_of: Option<DateInput>,
}

/// Request body for `POST /carryover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryoverRequest {
    /// The year carryover is granted into.
    pub year: i32,
    /// Ledger entries; only active `sick` entries dated in `year - 1` count.
    #[serde(default)]
    pub prior_year_entries: Vec<LedgerEntry>,
}

/// Request body for `POST /balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// The employee's policy profile.
    pub profile: EmployeePolicyProfile,
    /// The reporting year.
    pub year: i32,
    /// Evaluation date. Defaults to today.
    #[serde(default)]
    pub as_of: Option<DateInput>,
    /// The employee's ledger. Entries outside the year or track are ignored.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    /// Carryover applied to the year. Defaults to the profile's override.
    #[serde(default)]
    pub applied_carryover: Option<Decimal>,
    /// Track to fold. Defaults to the year's default track.
    #[serde(default)]
    pub track: Option<LeaveTrack>,
}

/// Query string for `GET /employees/:employee_id/balance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceQuery {
    /// The reporting year. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Track to fold.
    #[serde(default)]
    pub track: Option<LeaveTrack>,
}

/// Request body for `POST /employees/:employee_id/ledger`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntryRequest {
    /// Who is recording the entry.
    pub actor: String,
    /// The raw entry.
    pub entry: LedgerEntryDraft,
}

/// Request body for `PATCH /employees/:employee_id/ledger/:entry_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEntryRequest {
    /// Who is editing the entry.
    pub actor: String,
    /// The fields to change.
    #[serde(default)]
    pub patch: LedgerEntryPatch,
}

/// Query string for `DELETE /employees/:employee_id/ledger/:entry_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidEntryQuery {
    /// Who is voiding the entry.
    pub actor: String,
}

/// Request body for `POST /employees/:employee_id/carryover/:year`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyCarryoverRequest {
    /// Who is applying the carryover.
    pub actor: String,
    /// Amount to apply. Defaults to the suggested carryover.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Overwrite a previously applied value.
    #[serde(default)]
    pub replace: bool,
}

/// Request body for `POST /employees/:employee_id/rehire`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RehireRequest {
    /// Who is recording the rehire.
    pub actor: String,
    /// Last day of the closing employment period.
    pub terminated_on: DateInput,
    /// First day of the new employment period.
    pub rehired_on: DateInput,
}
