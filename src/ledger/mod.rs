//! Ledger storage and mutation.
//!
//! [`LedgerStore`] is the persistence seam; [`LedgerEntryRecorder`] is the
//! only writer and validates everything it stores.

mod recorder;
mod store;

pub use recorder::{LedgerEntryRecorder, validate_amount};
pub use store::{InMemoryLedgerStore, LedgerStore};
