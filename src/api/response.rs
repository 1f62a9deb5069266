//! Response types for the leave engine API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from [`EngineError`] to an HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Response body for `POST /carryover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryoverResponse {
    /// The year carryover is granted into.
    pub year: i32,
    /// Sick days carried into `year`.
    pub carryover: Decimal,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidPolicy { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidLedgerEntry { field, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_LEDGER_ENTRY",
                    message,
                    format!("Correct the '{}' field and resubmit", field),
                ),
            ),
            EngineError::UnknownEntryType { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_ENTRY_TYPE",
                    message,
                    "Expected one of: pto, sick, comp, pto_adjustment, sick_adjustment",
                ),
            ),
            EngineError::InvalidDate { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_DATE",
                    message,
                    "Dates must be YYYY-MM-DD, RFC 3339, or a { seconds, nanoseconds } timestamp",
                ),
            ),
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::EntryNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("ENTRY_NOT_FOUND", message),
            ),
            EngineError::EntryVoided { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("ENTRY_VOIDED", message),
            ),
            EngineError::DuplicateEntry { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_ENTRY", message),
            ),
            EngineError::TrackRequired { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "TRACK_REQUIRED",
                    message,
                    "Set 'track' to 'hourly' or 'salary'",
                ),
            ),
            EngineError::TrackMismatch { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("TRACK_MISMATCH", message),
            ),
            EngineError::CarryoverAlreadyApplied { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CARRYOVER_ALREADY_APPLIED",
                    message,
                    "Set 'replace' to overwrite the applied value",
                ),
            ),
        }
    }
}
