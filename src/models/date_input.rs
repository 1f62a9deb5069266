//! Boundary date shapes.
//!
//! Stored records carry dates either as a timestamp object with seconds
//! and nanoseconds or as a text date. Both are normalized to a single
//! [`NaiveDate`] here, before anything reaches the engine.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A date as it arrives from a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// Seconds since the Unix epoch, interpreted in UTC.
    Timestamp {
        /// Whole seconds.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// Sub-second nanoseconds.
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// `YYYY-MM-DD` or an RFC 3339 date-time.
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Text(date.format("%Y-%m-%d").to_string())
    }
}

/// Normalizes a boundary date to a calendar date.
///
/// RFC 3339 date-times keep the calendar date of their own offset.
///
/// # Examples
///
/// ```
/// use leave_engine::models::{normalize_date, DateInput};
/// use chrono::NaiveDate;
///
/// let text = DateInput::Text("2026-02-14".to_string());
/// assert_eq!(normalize_date(&text).unwrap(), NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
///
/// let stamp = DateInput::Timestamp { seconds: 1_771_027_200, nanoseconds: 0 };
/// assert_eq!(normalize_date(&stamp).unwrap(), NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
/// ```
pub fn normalize_date(input: &DateInput) -> EngineResult<NaiveDate> {
    match input {
        DateInput::Timestamp {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| EngineError::InvalidDate {
                value: format!("{{seconds: {}, nanoseconds: {}}}", seconds, nanoseconds),
                message: "timestamp out of range".to_string(),
            }),
        DateInput::Text(text) => {
            let trimmed = text.trim();
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return Ok(date);
            }
            DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.date_naive())
                .map_err(|e| EngineError::InvalidDate {
                    value: text.clone(),
                    message: e.to_string(),
                })
        }
    }
}
