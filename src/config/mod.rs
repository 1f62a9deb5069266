//! Configuration loading and management for the leave engine.
//!
//! This module loads the organization-wide leave constants from a YAML
//! file and validates them before any computation sees them.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Sick carryover cap: {}", config.policy().sick_carryover_cap);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PolicyConstants, RehirePolicy};
