//! Calendar helpers shared by the accrual and carryover rules.

use chrono::NaiveDate;

/// Returns January 1 of `year`.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Returns December 31 of `year`.
pub fn year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Counts the calendar days from `from` through `to`, both inclusive.
///
/// Returns zero when `to` precedes `from`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::days_inclusive;
/// use chrono::NaiveDate;
///
/// let jul_2 = NaiveDate::from_ymd_opt(2023, 7, 2).unwrap();
/// let dec_31 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// assert_eq!(days_inclusive(jul_2, dec_31), 183);
/// assert_eq!(days_inclusive(dec_31, dec_31), 1);
/// assert_eq!(days_inclusive(dec_31, jul_2), 0);
/// ```
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> i64 {
    ((to - from).num_days() + 1).max(0)
}
