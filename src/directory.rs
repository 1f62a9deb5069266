//! Employee directory collaborator.
//!
//! Supplies the policy profile for an employee and records applied sick
//! carryover. The engine never resets a profile; rehires go through
//! [`EmployeePolicyProfile::rehire`] so ledger history survives.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeePolicyProfile;

/// Source of employee policy profiles.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns the profile for `employee_id`.
    fn profile(&self, employee_id: &str) -> EngineResult<EmployeePolicyProfile>;

    /// Inserts or replaces a profile.
    fn upsert(&self, profile: EmployeePolicyProfile) -> EngineResult<()>;

    /// Writes the applied sick carryover for `year`.
    ///
    /// Fails with [`EngineError::CarryoverAlreadyApplied`] when a value is
    /// already present and `replace` is false. The check and the write
    /// happen atomically.
    fn set_sick_carryover_override(
        &self,
        employee_id: &str,
        year: i32,
        amount: Decimal,
        replace: bool,
    ) -> EngineResult<EmployeePolicyProfile>;
}

/// In-process directory keyed by employee id.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: RwLock<HashMap<String, EmployeePolicyProfile>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with `profiles`.
    pub fn with_profiles(profiles: impl IntoIterator<Item = EmployeePolicyProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|p| (p.employee_id.clone(), p))
            .collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn profile(&self, employee_id: &str) -> EngineResult<EmployeePolicyProfile> {
        let profiles = self
            .profiles
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        profiles
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn upsert(&self, profile: EmployeePolicyProfile) -> EngineResult<()> {
        let mut profiles = self
            .profiles
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        profiles.insert(profile.employee_id.clone(), profile);
        Ok(())
    }

    fn set_sick_carryover_override(
        &self,
        employee_id: &str,
        year: i32,
        amount: Decimal,
        replace: bool,
    ) -> EngineResult<EmployeePolicyProfile> {
        let mut profiles = self
            .profiles
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let profile = profiles
            .get_mut(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;

        if profile.has_applied_carryover(year) && !replace {
            return Err(EngineError::CarryoverAlreadyApplied {
                employee_id: employee_id.to_string(),
                year,
            });
        }

        profile.sick_carryover_overrides.insert(year, amount);
        Ok(profile.clone())
    }
}
