//! Sick carryover suggestion.
//!
//! Unused sick allowance from year Y-1 may be carried into year Y, capped
//! at `sick_carryover_cap`. The value computed here is only a suggestion:
//! it takes effect once it is applied to the employee profile, after which
//! later edits to the prior year never change it.

use rust_decimal::Decimal;

use crate::config::PolicyConstants;
use crate::models::{EmployeePolicyProfile, LedgerEntry, LedgerEntryType};

use super::scope::{employed_at_year_end, is_in_scope};

/// Computes the carryover into `year` from the prior year's entries.
///
/// `carryover = clamp(annual_sick_days - sick used in year - 1, 0, cap)`.
/// Only active `Sick` entries dated in `year - 1` count; sick adjustments
/// do not. Years before `carryover_program_start_year` yield zero.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_carryover;
/// use leave_engine::config::PolicyConstants;
/// use rust_decimal::Decimal;
///
/// let carryover = compute_carryover(2026, std::iter::empty(), &PolicyConstants::default());
/// assert_eq!(carryover, Decimal::new(5, 0));
///
/// let before_program = compute_carryover(2020, std::iter::empty(), &PolicyConstants::default());
/// assert_eq!(before_program, Decimal::ZERO);
/// ```
pub fn compute_carryover<'a, I>(year: i32, prior_year_entries: I, policy: &PolicyConstants) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    if year < policy.carryover_program_start_year {
        return Decimal::ZERO;
    }
    let Some(prior_year) = year.checked_sub(1) else {
        return Decimal::ZERO;
    };

    let sick_used: Decimal = prior_year_entries
        .into_iter()
        .filter(|entry| entry.is_active())
        .filter(|entry| entry.year() == prior_year)
        .filter(|entry| entry.entry_type == LedgerEntryType::Sick)
        .map(|entry| entry.amount)
        .sum();

    (policy.annual_sick_days - sick_used)
        .min(policy.sick_carryover_cap)
        .max(Decimal::ZERO)
}

/// Suggests the carryover into `year` for one employee.
///
/// Reads the employee's whole ledger, keeps only entries in scope for
/// the rehire policy, and yields zero when the employee was not employed
/// at the end of the prior year.
pub fn suggest_carryover(
    profile: &EmployeePolicyProfile,
    year: i32,
    entries: &[LedgerEntry],
    policy: &PolicyConstants,
) -> Decimal {
    let Some(prior_year) = year.checked_sub(1) else {
        return Decimal::ZERO;
    };
    if !employed_at_year_end(profile, prior_year, policy) {
        return Decimal::ZERO;
    }

    compute_carryover(
        year,
        entries
            .iter()
            .filter(|entry| is_in_scope(profile, entry, policy)),
        policy,
    )
}
