//! Allowance and balance result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an allowance was derived for the requested year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceStatus {
    /// The year precedes the hire year, or the hire date is unknown.
    NotEligible,
    /// The year is after the current year.
    FutureYear,
    /// A completed hire year, prorated from the hire date.
    ProratedStartYear,
    /// A completed year with the full annual amounts.
    FullYear,
    /// The current year: PTO accruing, sick front-loaded.
    AccruingCurrentYear,
}

/// Raw entitlement for a year, before usage is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// PTO days.
    pub pto_days: Decimal,
    /// Sick days.
    pub sick_days: Decimal,
    /// How the amounts were derived.
    pub status: AllowanceStatus,
}

impl Allowance {
    /// Creates a zero allowance with the given status.
    pub fn zero(status: AllowanceStatus) -> Self {
        Self {
            pto_days: Decimal::ZERO,
            sick_days: Decimal::ZERO,
            status,
        }
    }
}

/// Current balances for a year.
///
/// Values are never floored at zero; a negative balance is an overdraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Remaining PTO days.
    pub pto_balance: Decimal,
    /// Remaining sick days.
    pub sick_balance: Decimal,
}

impl Balance {
    /// Returns true if more PTO was used than was available.
    pub fn is_pto_overdrawn(&self) -> bool {
        self.pto_balance.is_sign_negative() && !self.pto_balance.is_zero()
    }

    /// Returns true if more sick leave was used than was available.
    pub fn is_sick_overdrawn(&self) -> bool {
        self.sick_balance.is_sign_negative() && !self.sick_balance.is_zero()
    }
}
