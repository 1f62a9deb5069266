//! Time-off entitlement and balance engine.
//!
//! This crate computes yearly PTO and sick allowances from a hire date,
//! suggests and applies capped sick carryover, and derives running
//! balances from an append-only ledger of leave entries.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
