//! Time source collaborator.
//!
//! Pure calculations take their as-of date as an argument; only the
//! recorder and the engine façade ask a [`Clock`] for "now".

use chrono::{DateTime, NaiveDate, Utc};

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
///
/// # Example
///
/// ```
/// use leave_engine::clock::{Clock, FixedClock};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always returns `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
