//! Policy configuration types.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// What happens to ledger history from an earlier employment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RehirePolicy {
    /// Entries dated before the current hire date are ignored by every computation.
    #[default]
    ForfeitPriorPeriod,
    /// Entries from earlier periods keep counting.
    CarryPriorPeriod,
}

/// Organization-wide leave constants.
///
/// Shared read-only by every computation; nothing in the engine caches a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConstants {
    /// PTO days granted per full year.
    pub annual_pto_days: Decimal,
    /// Sick days granted per full year.
    pub annual_sick_days: Decimal,
    /// Maximum sick days carried into the next year.
    pub sick_carryover_cap: Decimal,
    /// Days in an accrual year.
    pub daily_accrual_divisor: Decimal,
    /// First year a carryover may be applied to.
    pub carryover_program_start_year: i32,
    /// Treatment of pre-rehire ledger history.
    #[serde(default)]
    pub rehire_policy: RehirePolicy,
    /// Combined sick cap found in older configuration. Only checked for
    /// consistency against `annual_sick_days + sick_carryover_cap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_sick_total_cap: Option<Decimal>,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            annual_pto_days: Decimal::new(15, 0),
            annual_sick_days: Decimal::new(5, 0),
            sick_carryover_cap: Decimal::new(5, 0),
            daily_accrual_divisor: Decimal::new(365, 0),
            carryover_program_start_year: 2025,
            rehire_policy: RehirePolicy::ForfeitPriorPeriod,
            legacy_sick_total_cap: None,
        }
    }
}

impl PolicyConstants {
    /// Checks that every constant is in range.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::config::PolicyConstants;
    /// use rust_decimal::Decimal;
    ///
    /// let mut policy = PolicyConstants::default();
    /// assert!(policy.validate().is_ok());
    ///
    /// policy.daily_accrual_divisor = Decimal::ZERO;
    /// assert!(policy.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.daily_accrual_divisor <= Decimal::ZERO {
            return Err(invalid("daily_accrual_divisor", "must be greater than zero"));
        }
        if self.annual_pto_days.is_sign_negative() && !self.annual_pto_days.is_zero() {
            return Err(invalid("annual_pto_days", "must not be negative"));
        }
        if self.annual_sick_days.is_sign_negative() && !self.annual_sick_days.is_zero() {
            return Err(invalid("annual_sick_days", "must not be negative"));
        }
        if self.sick_carryover_cap.is_sign_negative() && !self.sick_carryover_cap.is_zero() {
            return Err(invalid("sick_carryover_cap", "must not be negative"));
        }
        Ok(())
    }

    /// Returns the legacy combined cap when it disagrees with
    /// `annual_sick_days + sick_carryover_cap`.
    pub fn conflicting_legacy_cap(&self) -> Option<Decimal> {
        self.legacy_sick_total_cap
            .filter(|cap| *cap != self.annual_sick_days + self.sick_carryover_cap)
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}
