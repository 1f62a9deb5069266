//! HTTP request handlers for the leave engine API.
//!
//! Handlers are thin: they parse the request, call one engine operation
//! and map the result. Every request is logged under a fresh correlation id.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_allowance, compute_balance, compute_carryover, entries_for_year, report_track,
};
use crate::error::{EngineError, EngineResult};
use crate::models::normalize_date;

use super::request::{
    AllowanceRequest, ApplyCarryoverRequest, BalanceQuery, BalanceRequest, CarryoverRequest,
    EditEntryRequest, RecordEntryRequest, RehireRequest, VoidEntryQuery,
};
use super::response::{ApiError, ApiErrorResponse, CarryoverResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allowance", post(allowance_handler))
        .route("/carryover", post(carryover_handler))
        .route("/balance", post(balance_handler))
        .route("/employees/:employee_id/balance", get(employee_balance_handler))
        .route(
            "/employees/:employee_id/ledger",
            get(list_ledger_handler).post(record_entry_handler),
        )
        .route(
            "/employees/:employee_id/ledger/:entry_id",
            patch(edit_entry_handler).delete(void_entry_handler),
        )
        .route(
            "/employees/:employee_id/carryover/:year",
            post(apply_carryover_handler),
        )
        .route("/employees/:employee_id/rehire", post(rehire_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn respond<T: Serialize>(correlation_id: Uuid, status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for `POST /allowance`.
async fn allowance_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllowanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allowance request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let result = request
        .as_of
        .as_ref()
        .map(normalize_date)
        .transpose()
        .map(|as_of| {
            let as_of = as_of.unwrap_or_else(|| engine.today());
            compute_allowance(&request.profile, request.year, as_of, engine.policy())
        });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `POST /carryover`.
async fn carryover_handler(
    State(state): State<AppState>,
    payload: Result<Json<CarryoverRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing carryover request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let carryover = compute_carryover(
        request.year,
        &request.prior_year_entries,
        state.engine().policy(),
    );

    json_response(
        StatusCode::OK,
        CarryoverResponse {
            year: request.year,
            carryover,
        },
    )
}

/// Handler for `POST /balance`.
///
/// Computes the allowance and folds the supplied ledger for one track.
async fn balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let as_of = match request.as_of.as_ref().map(normalize_date).transpose() {
        Ok(as_of) => as_of.unwrap_or_else(|| engine.today()),
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let profile = &request.profile;
    let track = match report_track(profile, request.year, request.track) {
        Ok(track) => track,
        Err(err) => return engine_error_response(correlation_id, err),
    };
    let allowance = compute_allowance(profile, request.year, as_of, engine.policy());
    let applied_carryover = request
        .applied_carryover
        .unwrap_or_else(|| profile.applied_carryover(request.year));
    let year_entries = entries_for_year(
        profile,
        &request.entries,
        request.year,
        track,
        engine.policy(),
    );
    let balance = compute_balance(year_entries, &allowance, applied_carryover);

    info!(
        correlation_id = %correlation_id,
        employee_id = %profile.employee_id,
        year = request.year,
        pto_balance = %balance.pto_balance,
        sick_balance = %balance.sick_balance,
        "Balance computed"
    );

    json_response(StatusCode::OK, balance)
}

/// Handler for `GET /employees/:employee_id/balance`.
async fn employee_balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing balance report request"
    );

    let engine = state.engine();
    let year = query.year.unwrap_or_else(|| engine.today().year());
    let result = engine.balance_report(&employee_id, year, query.track);

    if let Ok(report) = &result {
        info!(
            correlation_id = %correlation_id,
            employee_id = %employee_id,
            year = year,
            warnings = report.audit_trace.warnings.len(),
            duration_us = report.audit_trace.duration_us,
            "Balance report completed"
        );
    }

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for `GET /employees/:employee_id/ledger`.
async fn list_ledger_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Listing ledger"
    );

    respond(
        correlation_id,
        StatusCode::OK,
        state.engine().ledger(&employee_id),
    )
}

/// Handler for `POST /employees/:employee_id/ledger`.
async fn record_entry_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<RecordEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing ledger entry"
    );

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::CREATED,
        state
            .engine()
            .record(&employee_id, request.entry, &request.actor),
    )
}

/// Handler for `PATCH /employees/:employee_id/ledger/:entry_id`.
async fn edit_entry_handler(
    State(state): State<AppState>,
    Path((employee_id, entry_id)): Path<(String, Uuid)>,
    payload: Result<Json<EditEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        entry_id = %entry_id,
        "Processing ledger edit"
    );

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state
            .engine()
            .edit(&employee_id, entry_id, request.patch, &request.actor),
    )
}

/// Handler for `DELETE /employees/:employee_id/ledger/:entry_id`.
///
/// Voids the entry; it stays in the ledger.
async fn void_entry_handler(
    State(state): State<AppState>,
    Path((employee_id, entry_id)): Path<(String, Uuid)>,
    Query(query): Query<VoidEntryQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        entry_id = %entry_id,
        "Processing ledger void"
    );

    respond(
        correlation_id,
        StatusCode::OK,
        state.engine().void(&employee_id, entry_id, &query.actor),
    )
}

/// Handler for `POST /employees/:employee_id/carryover/:year`.
async fn apply_carryover_handler(
    State(state): State<AppState>,
    Path((employee_id, year)): Path<(String, i32)>,
    payload: Result<Json<ApplyCarryoverRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year = year,
        "Processing carryover application"
    );

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state.engine().apply_carryover(
            &employee_id,
            year,
            request.amount,
            request.replace,
            &request.actor,
        ),
    )
}

/// Handler for `POST /employees/:employee_id/rehire`.
async fn rehire_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<RehireRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing rehire"
    );

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = normalize_date(&request.terminated_on).and_then(|terminated_on| {
        let rehired_on = normalize_date(&request.rehired_on)?;
        state
            .engine()
            .rehire(&employee_id, terminated_on, rehired_on, &request.actor)
    });

    respond(correlation_id, StatusCode::OK, result)
}
