//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::PolicyConstants;

/// Loads and provides access to leave policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # Organization-wide leave constants
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Annual PTO: {}", loader.policy().annual_pto_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PolicyConstants,
}

impl ConfigLoader {
    /// Loads policy from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing, is not valid YAML,
    /// lacks a required field, or holds an out-of-range constant.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use leave_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), leave_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let policy = Self::load_yaml::<PolicyConstants>(&policy_path)?;
        let loader = Self::from_policy(policy)?;

        info!(
            path = %policy_path.display(),
            annual_pto_days = %loader.policy.annual_pto_days,
            annual_sick_days = %loader.policy.annual_sick_days,
            sick_carryover_cap = %loader.policy.sick_carryover_cap,
            "Loaded leave policy"
        );

        Ok(loader)
    }

    /// Wraps already-built constants after validating them.
    pub fn from_policy(policy: PolicyConstants) -> EngineResult<Self> {
        policy.validate()?;

        if let Some(legacy_cap) = policy.conflicting_legacy_cap() {
            warn!(
                legacy_sick_total_cap = %legacy_cap,
                annual_sick_days = %policy.annual_sick_days,
                sick_carryover_cap = %policy.sick_carryover_cap,
                "Legacy combined sick cap disagrees with annual sick days plus carryover cap; \
                 sick_carryover_cap is authoritative"
            );
        }

        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy constants.
    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            policy: PolicyConstants::default(),
        }
    }
}
