//! HTTP API module for the leave engine.
//!
//! A thin presentation layer over [`crate::engine::LeaveEngine`] and the
//! pure calculation functions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AllowanceRequest, ApplyCarryoverRequest, BalanceQuery, BalanceRequest, CarryoverRequest,
    EditEntryRequest, RecordEntryRequest, RehireRequest, VoidEntryQuery,
};
pub use response::{ApiError, ApiErrorResponse, CarryoverResponse};
pub use state::AppState;
