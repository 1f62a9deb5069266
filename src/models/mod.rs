//! Core data models for the leave engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod date_input;
mod employee;
mod ledger_entry;
mod report;

pub use allowance::{Allowance, AllowanceStatus, Balance};
pub use date_input::{DateInput, normalize_date};
pub use employee::{Classification, EmployeePolicyProfile, EmploymentPeriod};
pub use ledger_entry::{
    LeaveTrack, LedgerEntry, LedgerEntryDraft, LedgerEntryPatch, LedgerEntryType,
};
pub use report::{AuditStep, AuditTrace, AuditWarning, BalanceReport};
