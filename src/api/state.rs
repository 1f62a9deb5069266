//! Application state for the leave engine API.

use std::sync::Arc;

use crate::engine::LeaveEngine;

/// Shared application state.
///
/// Holds the engine, which in turn owns the policy constants and the
/// directory, ledger and clock collaborators.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<LeaveEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: LeaveEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &LeaveEngine {
        &self.engine
    }
}
