//! The leave engine façade.
//!
//! [`LeaveEngine`] wires the employee directory, the ledger store, the
//! clock and the policy constants together. Reads go through the pure
//! functions in [`crate::calculation`]; writes go through the
//! [`LedgerEntryRecorder`] or the directory's carryover override.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    YearClassification, classification_for_year, compute_allowance, compute_balance,
    entries_for_year, rehired_in_year, report_track, suggest_carryover,
};
use crate::clock::Clock;
use crate::config::PolicyConstants;
use crate::directory::EmployeeDirectory;
use crate::error::{EngineError, EngineResult};
use crate::ledger::{LedgerEntryRecorder, LedgerStore};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BalanceReport, EmployeePolicyProfile, LeaveTrack,
    LedgerEntry, LedgerEntryDraft, LedgerEntryPatch,
};

/// The version of the engine, stamped into every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry point for balance queries and ledger mutations.
#[derive(Clone)]
pub struct LeaveEngine {
    policy: PolicyConstants,
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    recorder: LedgerEntryRecorder,
}

impl LeaveEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        policy: PolicyConstants,
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let recorder = LedgerEntryRecorder::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            policy,
            directory,
            store,
            clock,
            recorder,
        }
    }

    /// Returns the policy constants in effect.
    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    /// Returns the employee directory.
    pub fn directory(&self) -> &dyn EmployeeDirectory {
        self.directory.as_ref()
    }

    /// Returns every ledger entry for the employee, voided ones included.
    pub fn ledger(&self, employee_id: &str) -> EngineResult<Vec<LedgerEntry>> {
        self.directory.profile(employee_id)?;
        self.store.load(employee_id)
    }

    /// Validates and records a new ledger entry.
    pub fn record(
        &self,
        employee_id: &str,
        draft: LedgerEntryDraft,
        actor: &str,
    ) -> EngineResult<LedgerEntry> {
        let profile = self.directory.profile(employee_id)?;
        self.recorder.record(&profile, draft, actor)
    }

    /// Edits one ledger entry.
    pub fn edit(
        &self,
        employee_id: &str,
        entry_id: Uuid,
        patch: LedgerEntryPatch,
        actor: &str,
    ) -> EngineResult<LedgerEntry> {
        let profile = self.directory.profile(employee_id)?;
        self.recorder.edit(&profile, entry_id, patch, actor)
    }

    /// Voids one ledger entry.
    pub fn void(&self, employee_id: &str, entry_id: Uuid, actor: &str) -> EngineResult<LedgerEntry> {
        self.directory.profile(employee_id)?;
        self.recorder.void(employee_id, entry_id, actor)
    }

    /// Closes the current employment period and starts a new one.
    ///
    /// The ledger is left untouched; the rehire policy decides which
    /// earlier entries keep counting.
    pub fn rehire(
        &self,
        employee_id: &str,
        terminated_on: NaiveDate,
        rehired_on: NaiveDate,
        actor: &str,
    ) -> EngineResult<EmployeePolicyProfile> {
        let mut profile = self.directory.profile(employee_id)?;
        profile.rehire(terminated_on, rehired_on)?;
        self.directory.upsert(profile.clone())?;

        info!(
            employee_id = %employee_id,
            terminated_on = %terminated_on,
            rehired_on = %rehired_on,
            rehire_policy = ?self.policy.rehire_policy,
            actor = %actor,
            "Recorded rehire"
        );

        Ok(profile)
    }

    /// Suggests the sick carryover into `year` from the current ledger.
    pub fn suggested_carryover(&self, employee_id: &str, year: i32) -> EngineResult<Decimal> {
        let profile = self.directory.profile(employee_id)?;
        let entries = self.store.load(employee_id)?;
        Ok(suggest_carryover(&profile, year, &entries, &self.policy))
    }

    /// Applies sick carryover into `year`.
    ///
    /// When `amount` is `None` the suggested value is applied. Once applied
    /// the value is fixed: later edits to the prior year's ledger do not
    /// change it. Re-applying requires `replace`.
    pub fn apply_carryover(
        &self,
        employee_id: &str,
        year: i32,
        amount: Option<Decimal>,
        replace: bool,
        actor: &str,
    ) -> EngineResult<EmployeePolicyProfile> {
        let profile = self.directory.profile(employee_id)?;
        if profile.has_applied_carryover(year) && !replace {
            return Err(EngineError::CarryoverAlreadyApplied {
                employee_id: employee_id.to_string(),
                year,
            });
        }

        let suggested = {
            let entries = self.store.load(employee_id)?;
            suggest_carryover(&profile, year, &entries, &self.policy)
        };
        let amount = match amount {
            Some(chosen) if chosen.is_sign_negative() && !chosen.is_zero() => {
                return Err(EngineError::InvalidLedgerEntry {
                    field: "sick_carryover".to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            Some(chosen) => chosen,
            None => suggested,
        };

        if amount > self.policy.sick_carryover_cap {
            warn!(
                employee_id = %employee_id,
                year = year,
                amount = %amount,
                cap = %self.policy.sick_carryover_cap,
                "Applied sick carryover exceeds the policy cap"
            );
        }

        let updated = self
            .directory
            .set_sick_carryover_override(employee_id, year, amount, replace)?;

        info!(
            employee_id = %employee_id,
            year = year,
            amount = %amount,
            suggested = %suggested,
            replace = replace,
            actor = %actor,
            "Applied sick carryover"
        );

        Ok(updated)
    }

    /// Builds the balance report for one employee, year and track.
    ///
    /// Without an explicit `track` the year's default track is read; in a
    /// transition year that is the salary track. A track that is invalid
    /// for the year is rejected.
    pub fn balance_report(
        &self,
        employee_id: &str,
        year: i32,
        track: Option<LeaveTrack>,
    ) -> EngineResult<BalanceReport> {
        let start_time = Instant::now();
        let profile = self.directory.profile(employee_id)?;
        let entries = self.store.load(employee_id)?;
        let as_of = self.clock.today();

        let classification = classification_for_year(&profile, year);
        let track = report_track(&profile, year, track)?;

        let mut steps = Vec::new();
        let mut warnings = Vec::new();

        steps.push(AuditStep {
            step_number: 1,
            rule_id: "classification".to_string(),
            rule_name: "Classification for Year".to_string(),
            input: json!({
                "year": year,
                "classification": profile.classification.as_str(),
                "salary_start_date": profile.salary_start_date,
            }),
            output: json!({
                "year_classification": classification.as_str(),
                "track": track.as_str(),
            }),
            reasoning: classification_reasoning(classification, track, year),
        });

        let allowance = compute_allowance(&profile, year, as_of, &self.policy);
        steps.push(AuditStep {
            step_number: 2,
            rule_id: "allowance".to_string(),
            rule_name: "Annual Allowance".to_string(),
            input: json!({
                "hire_date": profile.hire_date,
                "period_start": profile.period_start_for_year(year),
                "year": year,
                "as_of": as_of,
                "annual_pto_days": self.policy.annual_pto_days,
                "annual_sick_days": self.policy.annual_sick_days,
                "daily_accrual_divisor": self.policy.daily_accrual_divisor,
            }),
            output: json!({
                "pto_days": allowance.pto_days,
                "sick_days": allowance.sick_days,
                "status": allowance.status,
            }),
            reasoning: format!(
                "Allowance for {} as of {}: {} PTO days, {} sick days",
                year, as_of, allowance.pto_days, allowance.sick_days
            ),
        });

        let suggested_carryover = suggest_carryover(&profile, year, &entries, &self.policy);
        let applied_carryover = profile.applied_carryover(year);
        steps.push(AuditStep {
            step_number: 3,
            rule_id: "sick_carryover".to_string(),
            rule_name: "Sick Carryover".to_string(),
            input: json!({
                "year": year,
                "sick_carryover_cap": self.policy.sick_carryover_cap,
                "carryover_program_start_year": self.policy.carryover_program_start_year,
            }),
            output: json!({
                "suggested": suggested_carryover,
                "applied": applied_carryover,
            }),
            reasoning: if profile.has_applied_carryover(year) {
                format!(
                    "Applied carryover of {} days into {} (ledger now supports {})",
                    applied_carryover, year, suggested_carryover
                )
            } else {
                format!(
                    "No carryover applied into {}; ledger supports {} days",
                    year, suggested_carryover
                )
            },
        });

        let year_entries = entries_for_year(&profile, &entries, year, track, &self.policy);
        let entries_counted = year_entries.len();
        let balance = compute_balance(year_entries, &allowance, applied_carryover);
        steps.push(AuditStep {
            step_number: 4,
            rule_id: "balance".to_string(),
            rule_name: "Ledger Balance".to_string(),
            input: json!({
                "entries_counted": entries_counted,
                "track": track.as_str(),
            }),
            output: json!({
                "pto_balance": balance.pto_balance,
                "sick_balance": balance.sick_balance,
            }),
            reasoning: format!(
                "Folded {} active {} track entries dated in {}",
                entries_counted,
                track.as_str(),
                year
            ),
        });

        if profile.hire_date.is_none() {
            warnings.push(warning(
                "MISSING_HIRE_DATE",
                "Employee has no hire date; allowance is zero until one is recorded",
                "high",
            ));
        }
        if rehired_in_year(&profile, year) {
            warnings.push(warning(
                "REHIRED_IN_YEAR",
                &format!(
                    "Employee was rehired in {}; {:?} applies to earlier entries",
                    year, self.policy.rehire_policy
                ),
                "low",
            ));
        }
        if !profile.has_applied_carryover(year) && suggested_carryover > Decimal::ZERO {
            warnings.push(warning(
                "CARRYOVER_NOT_APPLIED",
                &format!(
                    "{} days of sick carryover into {} have not been applied",
                    suggested_carryover, year
                ),
                "medium",
            ));
        }
        if balance.is_pto_overdrawn() {
            warnings.push(warning(
                "PTO_OVERDRAWN",
                &format!("PTO balance is negative: {}", balance.pto_balance),
                "medium",
            ));
        }
        if balance.is_sick_overdrawn() {
            warnings.push(warning(
                "SICK_OVERDRAWN",
                &format!("Sick balance is negative: {}", balance.sick_balance),
                "medium",
            ));
        }

        let duration_us = start_time.elapsed().as_micros() as u64;
        debug!(
            employee_id = %employee_id,
            year = year,
            track = track.as_str(),
            pto_balance = %balance.pto_balance,
            sick_balance = %balance.sick_balance,
            duration_us = duration_us,
            "Built balance report"
        );

        Ok(BalanceReport {
            report_id: Uuid::new_v4(),
            generated_at: self.clock.now(),
            engine_version: ENGINE_VERSION.to_string(),
            employee_id: profile.employee_id.clone(),
            year,
            as_of,
            classification,
            track,
            allowance,
            suggested_carryover,
            applied_carryover,
            balance,
            entries_counted,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us,
            },
        })
    }

    /// Returns the current date according to the engine's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

fn classification_reasoning(
    classification: YearClassification,
    track: LeaveTrack,
    year: i32,
) -> String {
    match classification {
        YearClassification::Transition => format!(
            "{} is a transition year; reading the {} track",
            year,
            track.as_str()
        ),
        _ => format!(
            "{} is a full {} year",
            year,
            classification.as_str()
        ),
    }
}

fn warning(code: &str, message: &str, severity: &str) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message: message.to_string(),
        severity: severity.to_string(),
    }
}
