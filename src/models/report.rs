//! Balance report models.
//!
//! This module contains the [`BalanceReport`] type and its associated
//! audit structures, which capture everything that went into a balance:
//! the allowance, the carryover, the ledger fold and the rules applied.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Allowance, Balance, LeaveTrack};
use crate::calculation::YearClassification;

/// A single step in the audit trace recording a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while building a report.
///
/// Warnings never change a number; they surface conditions such as an
/// overdraft for the presentation layer to flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of rule applications.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated.
    pub warnings: Vec<AuditWarning>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// A balance for one employee, year and track, with its derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The employee the report is for.
    pub employee_id: String,
    /// The reporting year.
    pub year: i32,
    /// The date accrual was evaluated at.
    pub as_of: NaiveDate,
    /// Classification in effect for the year.
    pub classification: YearClassification,
    /// The track whose entries were folded.
    pub track: LeaveTrack,
    /// Raw entitlement.
    pub allowance: Allowance,
    /// Carryover the prior year's ledger supports.
    pub suggested_carryover: Decimal,
    /// Carryover actually applied to the year.
    pub applied_carryover: Decimal,
    /// Resulting balances.
    pub balance: Balance,
    /// Number of active entries folded into the balance.
    pub entries_counted: usize,
    /// Complete audit trace.
    pub audit_trace: AuditTrace,
}
