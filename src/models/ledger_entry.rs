//! Ledger entry model and related types.
//!
//! A ledger entry records one leave-balance-affecting event: usage, a
//! manual adjustment, or a comp-time credit. Entries are keyed by
//! `(employee_id, id)` and are voided rather than removed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

use super::DateInput;

/// The kind of event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// PTO taken. Debit.
    Pto,
    /// Sick leave taken. Debit.
    Sick,
    /// Comp time earned. Signed credit to PTO.
    Comp,
    /// Manual PTO correction. Signed credit.
    PtoAdjustment,
    /// Manual sick correction. Signed credit.
    SickAdjustment,
}

impl LedgerEntryType {
    /// Returns true for usage types (PTO and Sick), which must be positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::LedgerEntryType;
    ///
    /// assert!(LedgerEntryType::Sick.is_debit());
    /// assert!(!LedgerEntryType::Comp.is_debit());
    /// ```
    pub fn is_debit(&self) -> bool {
        matches!(self, LedgerEntryType::Pto | LedgerEntryType::Sick)
    }

    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Pto => "pto",
            LedgerEntryType::Sick => "sick",
            LedgerEntryType::Comp => "comp",
            LedgerEntryType::PtoAdjustment => "pto_adjustment",
            LedgerEntryType::SickAdjustment => "sick_adjustment",
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerEntryType {
    type Err = EngineError;

    /// Parses wire names and legacy display names alike
    /// (`"pto_adjustment"`, `"PTO Adjustment"`, `"PTOAdjustment"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "pto" => Ok(LedgerEntryType::Pto),
            "sick" => Ok(LedgerEntryType::Sick),
            "comp" => Ok(LedgerEntryType::Comp),
            "ptoadjustment" => Ok(LedgerEntryType::PtoAdjustment),
            "sickadjustment" => Ok(LedgerEntryType::SickAdjustment),
            _ => Err(EngineError::UnknownEntryType {
                value: s.to_string(),
            }),
        }
    }
}

/// The leave-tracking mode an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveTrack {
    /// Hourly call-in track.
    Hourly,
    /// Salary PTO track.
    Salary,
}

impl LeaveTrack {
    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveTrack::Hourly => "hourly",
            LeaveTrack::Salary => "salary",
        }
    }
}

/// A recorded ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee whose ledger this entry belongs to.
    pub employee_id: String,
    /// The calendar date the leave or adjustment applies to.
    pub date: NaiveDate,
    /// The kind of event.
    pub entry_type: LedgerEntryType,
    /// Days. Positive for debits; signed for credits.
    pub amount: Decimal,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// The leave track this entry counts against.
    pub track: LeaveTrack,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
    /// Who recorded the entry.
    pub created_by: String,
    /// When the entry was last edited.
    #[serde(default)]
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Who last edited the entry.
    #[serde(default)]
    pub last_modified_by: Option<String>,
    /// When the entry was voided.
    #[serde(default)]
    pub voided_at: Option<DateTime<Utc>>,
    /// Who voided the entry.
    #[serde(default)]
    pub voided_by: Option<String>,
}

impl LedgerEntry {
    /// Returns true unless the entry has been voided.
    pub fn is_active(&self) -> bool {
        self.voided_at.is_none()
    }

    /// Returns the calendar year the entry applies to.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Raw entry data as submitted by the presentation layer.
///
/// Nothing here is trusted: the recorder validates every field before a
/// [`LedgerEntry`] is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryDraft {
    /// The date the entry applies to, in any accepted shape.
    pub date: DateInput,
    /// The entry type name.
    pub entry_type: String,
    /// Days as a raw number.
    pub amount: f64,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// Leave track; required in a transition year.
    #[serde(default)]
    pub track: Option<LeaveTrack>,
}

/// A partial update to an existing entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerEntryPatch {
    /// New date.
    #[serde(default)]
    pub date: Option<DateInput>,
    /// New entry type name.
    #[serde(default)]
    pub entry_type: Option<String>,
    /// New amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// New note.
    #[serde(default)]
    pub note: Option<String>,
    /// New leave track.
    #[serde(default)]
    pub track: Option<LeaveTrack>,
}
