//! Classification transition rules.
//!
//! A year containing the Hourly to Salary conversion date is a transition
//! year in which both tracks are valid. The engine never splits such a
//! year on its own; the caller chooses a track per entry.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Classification, EmployeePolicyProfile, LeaveTrack};

/// Classification in effect for a whole reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearClassification {
    /// Hourly for the whole year.
    Hourly,
    /// Salary for the whole year.
    Salary,
    /// The conversion happened during the year.
    Transition,
}

impl YearClassification {
    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            YearClassification::Hourly => "hourly",
            YearClassification::Salary => "salary",
            YearClassification::Transition => "transition",
        }
    }

    /// Returns true if `track` may be used for entries in this year.
    pub fn allows(&self, track: LeaveTrack) -> bool {
        match self {
            YearClassification::Hourly => track == LeaveTrack::Hourly,
            YearClassification::Salary => track == LeaveTrack::Salary,
            YearClassification::Transition => true,
        }
    }
}

/// Determines the classification in effect for `year`.
///
/// Without a conversion date the profile's current classification
/// applies to every year.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{classification_for_year, YearClassification};
/// use leave_engine::models::{Classification, EmployeePolicyProfile};
/// use chrono::NaiveDate;
///
/// let mut profile = EmployeePolicyProfile::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
///     Classification::Salary,
/// );
/// profile.salary_start_date = NaiveDate::from_ymd_opt(2024, 6, 1);
///
/// assert_eq!(classification_for_year(&profile, 2023), YearClassification::Hourly);
/// assert_eq!(classification_for_year(&profile, 2024), YearClassification::Transition);
/// assert_eq!(classification_for_year(&profile, 2025), YearClassification::Salary);
/// ```
pub fn classification_for_year(profile: &EmployeePolicyProfile, year: i32) -> YearClassification {
    match profile.salary_start_year() {
        Some(salary_year) if year < salary_year => YearClassification::Hourly,
        Some(salary_year) if year == salary_year => YearClassification::Transition,
        Some(_) => YearClassification::Salary,
        None => match profile.classification {
            Classification::Hourly => YearClassification::Hourly,
            Classification::Salary => YearClassification::Salary,
        },
    }
}

/// Resolves the track an entry dated `date` is recorded against.
///
/// In a transition year `requested` is mandatory. Otherwise an omitted
/// track defaults to the year's only valid one and a mismatched track is
/// rejected.
pub fn resolve_track(
    profile: &EmployeePolicyProfile,
    date: NaiveDate,
    requested: Option<LeaveTrack>,
) -> EngineResult<LeaveTrack> {
    let year = date.year();
    let classification = classification_for_year(profile, year);

    match (classification, requested) {
        (YearClassification::Transition, None) => Err(EngineError::TrackRequired { year }),
        (YearClassification::Hourly, None) => Ok(LeaveTrack::Hourly),
        (YearClassification::Salary, None) => Ok(LeaveTrack::Salary),
        (classification, Some(track)) if classification.allows(track) => Ok(track),
        (classification, Some(track)) => Err(EngineError::TrackMismatch {
            track: track.as_str().to_string(),
            year,
            classification: classification.as_str().to_string(),
        }),
    }
}

/// Returns the track a balance query reads when the caller does not pick one.
///
/// Transition years default to the salary track.
pub fn default_track(profile: &EmployeePolicyProfile, year: i32) -> LeaveTrack {
    match classification_for_year(profile, year) {
        YearClassification::Hourly => LeaveTrack::Hourly,
        YearClassification::Salary | YearClassification::Transition => LeaveTrack::Salary,
    }
}

/// Resolves the track a balance query for `year` reads.
///
/// Unlike [`resolve_track`] a transition year without a requested track
/// is not an error; it falls back to [`default_track`].
pub fn report_track(
    profile: &EmployeePolicyProfile,
    year: i32,
    requested: Option<LeaveTrack>,
) -> EngineResult<LeaveTrack> {
    let classification = classification_for_year(profile, year);
    match requested {
        Some(track) if !classification.allows(track) => Err(EngineError::TrackMismatch {
            track: track.as_str().to_string(),
            year,
            classification: classification.as_str().to_string(),
        }),
        Some(track) => Ok(track),
        None => Ok(default_track(profile, year)),
    }
}
