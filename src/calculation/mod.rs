//! Calculation logic for the leave engine.
//!
//! Every function here is synchronous and side-effect free: allowance
//! accrual, sick carryover, balance aggregation, classification
//! transition rules and the ledger scoping they all share.

mod accrual;
mod balance;
mod carryover;
mod classification;
mod dates;
mod scope;

pub use accrual::compute_allowance;
pub use balance::compute_balance;
pub use carryover::{compute_carryover, suggest_carryover};
pub use classification::{
    YearClassification, classification_for_year, default_track, report_track, resolve_track,
};
pub use dates::{days_inclusive, year_end, year_start};
pub use scope::{employed_at_year_end, entries_for_year, is_in_scope, rehired_in_year};
