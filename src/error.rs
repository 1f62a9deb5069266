//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. All of them are data or
//! programming errors; none are transient.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy constant is outside its valid range.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The offending policy field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A ledger entry field was rejected during validation.
    #[error("Invalid ledger entry field '{field}': {message}")]
    InvalidLedgerEntry {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The entry type string did not name a known ledger entry type.
    #[error("Unknown ledger entry type: {value}")]
    UnknownEntryType {
        /// The unrecognised type string.
        value: String,
    },

    /// A date could not be normalized to a calendar date.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate {
        /// The raw input.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// The employee directory has no profile for this id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: String,
    },

    /// No ledger entry exists under the given key.
    #[error("Ledger entry {entry_id} not found for employee '{employee_id}'")]
    EntryNotFound {
        /// The employee whose ledger was searched.
        employee_id: String,
        /// The missing entry id.
        entry_id: Uuid,
    },

    /// The ledger entry has been voided and can no longer change.
    #[error("Ledger entry {entry_id} has been voided")]
    EntryVoided {
        /// The voided entry id.
        entry_id: Uuid,
    },

    /// An entry with this id already exists.
    #[error("Ledger entry {entry_id} already exists")]
    DuplicateEntry {
        /// The conflicting entry id.
        entry_id: Uuid,
    },

    /// The entry falls in a transition year and no leave track was chosen.
    #[error("Year {year} is a classification transition year; a leave track must be chosen")]
    TrackRequired {
        /// The transition year.
        year: i32,
    },

    /// The chosen leave track is not valid for the entry's year.
    #[error("Leave track '{track}' is not valid in {year} for a {classification} year")]
    TrackMismatch {
        /// The requested track.
        track: String,
        /// The entry's year.
        year: i32,
        /// The classification in effect that year.
        classification: String,
    },

    /// Carryover for the year was already applied and replacement was not requested.
    #[error("Sick carryover for {year} has already been applied for employee '{employee_id}'")]
    CarryoverAlreadyApplied {
        /// The employee id.
        employee_id: String,
        /// The year the carryover was applied to.
        year: i32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
