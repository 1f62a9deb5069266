//! Employee policy profile and related types.
//!
//! This module defines the per-employee facts the accrual rules need:
//! hire date, the optional Hourly to Salary conversion date, the
//! applied sick carryover per year, and prior employment periods.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Employment classification, determining which leave-tracking mode applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Hourly employee, tracked through call-ins.
    Hourly,
    /// Salaried employee, tracked through PTO.
    Salary,
}

impl Classification {
    /// Returns the snake_case name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Hourly => "hourly",
            Classification::Salary => "salary",
        }
    }
}

/// A closed employment period that preceded the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentPeriod {
    /// First day of the period.
    pub hired_on: NaiveDate,
    /// Last day of the period.
    pub terminated_on: NaiveDate,
}

/// Per-employee facts needed for accrual.
///
/// `hire_date` is the start of the *current* employment period. When an
/// employee is rehired the previous period is archived in
/// `employment_periods`; the ledger itself is never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePolicyProfile {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Start of the current employment period. Missing during data migration.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Date the employee converted from Hourly to Salary.
    #[serde(default)]
    pub salary_start_date: Option<NaiveDate>,
    /// Current classification.
    pub classification: Classification,
    /// Applied sick carryover keyed by the year it was granted into.
    #[serde(default)]
    pub sick_carryover_overrides: BTreeMap<i32, Decimal>,
    /// Earlier employment periods, oldest first.
    #[serde(default)]
    pub employment_periods: Vec<EmploymentPeriod>,
}

impl EmployeePolicyProfile {
    /// Creates a profile for a new hire with no history.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Classification, EmployeePolicyProfile};
    /// use chrono::NaiveDate;
    ///
    /// let hired = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    /// let profile = EmployeePolicyProfile::new("emp_001", hired, Classification::Salary);
    /// assert_eq!(profile.hire_year(), Some(2024));
    /// assert!(profile.employment_periods.is_empty());
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        hire_date: NaiveDate,
        classification: Classification,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            hire_date: Some(hire_date),
            salary_start_date: None,
            classification,
            sick_carryover_overrides: BTreeMap::new(),
            employment_periods: Vec::new(),
        }
    }

    /// Returns the year of the current hire date, if known.
    pub fn hire_year(&self) -> Option<i32> {
        self.hire_date.map(|d| d.year())
    }

    /// Returns the year of the Hourly to Salary conversion, if any.
    pub fn salary_start_year(&self) -> Option<i32> {
        self.salary_start_date.map(|d| d.year())
    }

    /// Returns the sick carryover applied to `year`, or zero when none was applied.
    pub fn applied_carryover(&self, year: i32) -> Decimal {
        self.sick_carryover_overrides
            .get(&year)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if a carryover value has been applied to `year`.
    pub fn has_applied_carryover(&self, year: i32) -> bool {
        self.sick_carryover_overrides.contains_key(&year)
    }

    /// Returns the first day of the employment period that governs `year`.
    ///
    /// The current period governs its hire year and every later year.
    /// Earlier years fall to the most recent archived period that overlaps
    /// them. Years outside every period, or any year when the hire date is
    /// unknown, yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Classification, EmployeePolicyProfile};
    /// use chrono::NaiveDate;
    ///
    /// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    /// let mut profile = EmployeePolicyProfile::new("emp_001", date(2019, 1, 1), Classification::Salary);
    /// profile.rehire(date(2025, 3, 31), date(2025, 9, 1)).unwrap();
    ///
    /// assert_eq!(profile.period_start_for_year(2023), Some(date(2019, 1, 1)));
    /// assert_eq!(profile.period_start_for_year(2025), Some(date(2025, 9, 1)));
    /// assert_eq!(profile.period_start_for_year(2018), None);
    /// ```
    pub fn period_start_for_year(&self, year: i32) -> Option<NaiveDate> {
        let hire_date = self.hire_date?;
        if hire_date.year() <= year {
            return Some(hire_date);
        }
        self.employment_periods
            .iter()
            .rev()
            .find(|period| period.hired_on.year() <= year && year <= period.terminated_on.year())
            .map(|period| period.hired_on)
    }

    /// Records a rehire.
    ///
    /// The current period is closed at `terminated_on` and archived, and
    /// `rehired_on` becomes the new hire date. When the current hire date
    /// is unknown nothing is archived.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDate`] when `rehired_on` does not follow
    /// `terminated_on`, or when `terminated_on` precedes the current hire date.
    pub fn rehire(&mut self, terminated_on: NaiveDate, rehired_on: NaiveDate) -> EngineResult<()> {
        if rehired_on <= terminated_on {
            return Err(EngineError::InvalidDate {
                value: rehired_on.to_string(),
                message: format!("rehire date must follow termination on {}", terminated_on),
            });
        }
        if let Some(hired_on) = self.hire_date {
            if terminated_on < hired_on {
                return Err(EngineError::InvalidDate {
                    value: terminated_on.to_string(),
                    message: format!("termination must not precede hire on {}", hired_on),
                });
            }
            self.employment_periods.push(EmploymentPeriod {
                hired_on,
                terminated_on,
            });
        }
        self.hire_date = Some(rehired_on);
        Ok(())
    }
}
