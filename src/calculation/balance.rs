//! Balance aggregation.
//!
//! Folds a year's allowance, applied carryover, adjustments and usage
//! into current balances. Nothing is cached between calls, so the same
//! inputs always produce the same balance.

use rust_decimal::Decimal;

use crate::models::{Allowance, Balance, LedgerEntry, LedgerEntryType};

/// Computes the PTO and sick balances for one year.
///
/// ```text
/// pto  = allowance.pto_days + comp + pto_adjustments - pto_used
/// sick = allowance.sick_days + applied_carryover + sick_adjustments - sick_used
/// ```
///
/// `year_entries` should already be narrowed to one year and one track.
/// Voided entries are skipped. Balances are not floored at zero.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_balance;
/// use leave_engine::models::{Allowance, AllowanceStatus};
/// use rust_decimal::Decimal;
///
/// let allowance = Allowance {
///     pto_days: Decimal::new(15, 0),
///     sick_days: Decimal::new(5, 0),
///     status: AllowanceStatus::FullYear,
/// };
/// let balance = compute_balance(std::iter::empty(), &allowance, Decimal::new(3, 0));
/// assert_eq!(balance.pto_balance, Decimal::new(15, 0));
/// assert_eq!(balance.sick_balance, Decimal::new(8, 0));
/// ```
pub fn compute_balance<'a, I>(
    year_entries: I,
    allowance: &Allowance,
    applied_carryover: Decimal,
) -> Balance
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut pto_balance = allowance.pto_days;
    let mut sick_balance = allowance.sick_days + applied_carryover;

    for entry in year_entries.into_iter().filter(|entry| entry.is_active()) {
        match entry.entry_type {
            LedgerEntryType::Comp | LedgerEntryType::PtoAdjustment => pto_balance += entry.amount,
            LedgerEntryType::Pto => pto_balance -= entry.amount,
            LedgerEntryType::SickAdjustment => sick_balance += entry.amount,
            LedgerEntryType::Sick => sick_balance -= entry.amount,
        }
    }

    Balance {
        pto_balance,
        sick_balance,
    }
}
