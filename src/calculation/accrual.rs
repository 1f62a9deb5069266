//! Annual entitlement calculation.
//!
//! This module computes a year's raw PTO and sick allowance from the
//! employee's hire date, the policy constants and an as-of date.
//!
//! PTO accrues continuously through the current year. Sick leave is
//! front-loaded: the whole (possibly prorated) amount is granted at the
//! start of the year, or on the hire date for a mid-year hire.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::PolicyConstants;
use crate::models::{Allowance, AllowanceStatus, EmployeePolicyProfile};

use super::dates::{days_inclusive, year_end, year_start};

/// Computes the allowance for `year` as seen on `as_of`.
///
/// The current year is the year of `as_of`. The year is measured from the
/// start of the employment period that governs it, so years inside an
/// archived period keep their allowance after a rehire. A profile without
/// a hire date, or a year outside every period, fails closed with a zero
/// [`AllowanceStatus::NotEligible`] allowance. Every amount is clamped to
/// `[0, annual amount]`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_allowance;
/// use leave_engine::config::PolicyConstants;
/// use leave_engine::models::{AllowanceStatus, Classification, EmployeePolicyProfile};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let profile = EmployeePolicyProfile::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     Classification::Salary,
/// );
/// let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
///
/// let allowance = compute_allowance(&profile, 2024, as_of, &PolicyConstants::default());
/// assert_eq!(allowance.pto_days, Decimal::new(15, 0));
/// assert_eq!(allowance.sick_days, Decimal::new(5, 0));
/// assert_eq!(allowance.status, AllowanceStatus::FullYear);
/// ```
pub fn compute_allowance(
    profile: &EmployeePolicyProfile,
    year: i32,
    as_of: NaiveDate,
    policy: &PolicyConstants,
) -> Allowance {
    let Some(period_start) = profile.period_start_for_year(year) else {
        return Allowance::zero(AllowanceStatus::NotEligible);
    };
    let current_year = as_of.year();

    if year > current_year {
        return Allowance::zero(AllowanceStatus::FutureYear);
    }

    let (Some(jan_1), Some(dec_31)) = (year_start(year), year_end(year)) else {
        return Allowance::zero(AllowanceStatus::NotEligible);
    };

    if year < current_year {
        if year == period_start.year() {
            let days_active = days_inclusive(period_start, dec_31);
            return Allowance {
                pto_days: prorate(policy.annual_pto_days, days_active, policy),
                sick_days: prorate(policy.annual_sick_days, days_active, policy),
                status: AllowanceStatus::ProratedStartYear,
            };
        }
        return Allowance {
            pto_days: clamp_to_annual(policy.annual_pto_days, policy.annual_pto_days),
            sick_days: clamp_to_annual(policy.annual_sick_days, policy.annual_sick_days),
            status: AllowanceStatus::FullYear,
        };
    }

    // Current year: the as-of day itself counts as accrued.
    let accrual_start = period_start.max(jan_1);
    let days_passed = days_inclusive(accrual_start, as_of);
    let pto_days = prorate(policy.annual_pto_days, days_passed, policy);

    let sick_days = if period_start <= jan_1 {
        clamp_to_annual(policy.annual_sick_days, policy.annual_sick_days)
    } else if as_of < period_start {
        Decimal::ZERO
    } else {
        prorate(
            policy.annual_sick_days,
            days_inclusive(period_start, dec_31),
            policy,
        )
    };

    Allowance {
        pto_days,
        sick_days,
        status: AllowanceStatus::AccruingCurrentYear,
    }
}

/// Scales `annual` by `days / daily_accrual_divisor`, clamped to `[0, annual]`.
fn prorate(annual: Decimal, days: i64, policy: &PolicyConstants) -> Decimal {
    let scaled = Decimal::from(days)
        .checked_div(policy.daily_accrual_divisor)
        .and_then(|fraction| fraction.checked_mul(annual))
        .unwrap_or(Decimal::ZERO);
    clamp_to_annual(scaled, annual)
}

fn clamp_to_annual(value: Decimal, annual: Decimal) -> Decimal {
    value.min(annual).max(Decimal::ZERO)
}
