//! Ledger selection.
//!
//! The ledger is never cleared on rehire; instead every computation reads
//! through this filter, which drops voided entries and, under
//! [`RehirePolicy::ForfeitPriorPeriod`], anything dated before the start of
//! the employment period that governs the entry's year. Years inside an
//! archived period therefore still read that period's entries.

use crate::config::{PolicyConstants, RehirePolicy};
use crate::models::{EmployeePolicyProfile, LeaveTrack, LedgerEntry};

use super::dates::year_end;

/// Returns true if `entry` counts toward computations for this profile.
pub fn is_in_scope(
    profile: &EmployeePolicyProfile,
    entry: &LedgerEntry,
    policy: &PolicyConstants,
) -> bool {
    if !entry.is_active() {
        return false;
    }
    match (policy.rehire_policy, profile.hire_date) {
        (RehirePolicy::ForfeitPriorPeriod, Some(_)) => profile
            .period_start_for_year(entry.year())
            .is_some_and(|start| entry.date >= start),
        _ => true,
    }
}

/// Selects the in-scope entries dated in `year` on `track`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::entries_for_year;
/// use leave_engine::config::PolicyConstants;
/// use leave_engine::models::{Classification, EmployeePolicyProfile, LeaveTrack};
/// use chrono::NaiveDate;
///
/// let profile = EmployeePolicyProfile::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
///     Classification::Salary,
/// );
/// let selected = entries_for_year(&profile, &[], 2026, LeaveTrack::Salary, &PolicyConstants::default());
/// assert!(selected.is_empty());
/// ```
pub fn entries_for_year<'a>(
    profile: &EmployeePolicyProfile,
    entries: &'a [LedgerEntry],
    year: i32,
    track: LeaveTrack,
    policy: &PolicyConstants,
) -> Vec<&'a LedgerEntry> {
    entries
        .iter()
        .filter(|entry| entry.year() == year && entry.track == track)
        .filter(|entry| is_in_scope(profile, entry, policy))
        .collect()
}

/// Returns true if the employee was employed on December 31 of `year`.
///
/// Under [`RehirePolicy::ForfeitPriorPeriod`] the employment must belong to
/// the period that governs `year + 1`, so nothing carries across a rehire.
/// Under [`RehirePolicy::CarryPriorPeriod`] any period covering the day counts.
pub fn employed_at_year_end(
    profile: &EmployeePolicyProfile,
    year: i32,
    policy: &PolicyConstants,
) -> bool {
    let Some(dec_31) = year_end(year) else {
        return false;
    };

    match policy.rehire_policy {
        RehirePolicy::ForfeitPriorPeriod => year
            .checked_add(1)
            .and_then(|next| profile.period_start_for_year(next))
            .is_some_and(|start| start <= dec_31),
        RehirePolicy::CarryPriorPeriod => {
            profile.hire_date.is_some_and(|hired| hired <= dec_31)
                || profile
                    .employment_periods
                    .iter()
                    .any(|period| period.hired_on <= dec_31 && period.terminated_on >= dec_31)
        }
    }
}

/// Returns true if `profile` has been rehired within `year`.
pub fn rehired_in_year(profile: &EmployeePolicyProfile, year: i32) -> bool {
    !profile.employment_periods.is_empty() && profile.hire_year() == Some(year)
}
