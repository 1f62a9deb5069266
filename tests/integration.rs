//! Integration tests for the leave engine HTTP API.
//!
//! This suite drives the router end to end:
//! - Stateless allowance, carryover and balance endpoints
//! - Ledger record, edit, void and listing
//! - Carryover application
//! - Balance reports for transition years and rehires
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::clock::FixedClock;
use leave_engine::config::ConfigLoader;
use leave_engine::directory::InMemoryDirectory;
use leave_engine::engine::LeaveEngine;
use leave_engine::ledger::InMemoryLedgerStore;
use leave_engine::models::{Classification, EmployeePolicyProfile, EmploymentPeriod};

// =============================================================================
// Test Helpers
// =============================================================================

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn field_decimal(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap())
}

fn test_profiles() -> Vec<EmployeePolicyProfile> {
    let salaried = EmployeePolicyProfile::new("emp_001", make_date("2020-01-06"), Classification::Salary);

    let mut converted =
        EmployeePolicyProfile::new("emp_002", make_date("2019-03-11"), Classification::Salary);
    converted.salary_start_date = Some(make_date("2026-06-01"));

    let mut rehired =
        EmployeePolicyProfile::new("emp_003", make_date("2026-04-01"), Classification::Hourly);
    rehired.employment_periods.push(EmploymentPeriod {
        hired_on: make_date("2018-02-01"),
        terminated_on: make_date("2025-10-31"),
    });

    vec![salaried, converted, rehired]
}

/// Builds a router over a fresh engine whose clock reads 2026-07-01.
fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let engine = LeaveEngine::new(
        config.policy().clone(),
        Arc::new(InMemoryDirectory::with_profiles(test_profiles())),
        Arc::new(InMemoryLedgerStore::new()),
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap(),
        )),
    );
    create_router(AppState::new(engine))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn record(router: &Router, employee_id: &str, entry: Value) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/employees/{}/ledger", employee_id),
        Some(json!({ "actor": "hr_admin", "entry": entry })),
    )
    .await
}

async fn balance_report(router: &Router, employee_id: &str, query: &str) -> Value {
    let (status, report) = send(
        router,
        "GET",
        &format!("/employees/{}/balance?{}", employee_id, query),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected report error: {}", report);
    report
}

fn warning_codes(report: &Value) -> Vec<String> {
    report["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Stateless Calculations
// =============================================================================

#[tokio::test]
async fn test_allowance_completed_past_year() {
    let router = create_router_for_test();
    let (status, allowance) = send(
        &router,
        "POST",
        "/allowance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2023-01-01", "classification": "salary" },
            "year": 2024,
            "as_of": "2025-02-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&allowance["pto_days"]), decimal("15"));
    assert_eq!(field_decimal(&allowance["sick_days"]), decimal("5"));
    assert_eq!(allowance["status"], "full_year");
}

#[tokio::test]
async fn test_allowance_accruing_current_year() {
    let router = create_router_for_test();
    let (status, allowance) = send(
        &router,
        "POST",
        "/allowance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2024-01-01", "classification": "salary" },
            "year": 2024,
            "as_of": "2024-07-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let pto = field_decimal(&allowance["pto_days"]);
    assert!((pto - decimal("7.52")).abs() <= decimal("0.01"), "got {}", pto);
    assert_eq!(allowance["status"], "accruing_current_year");
}

#[tokio::test]
async fn test_allowance_accepts_timestamp_as_of() {
    let router = create_router_for_test();
    let (status, allowance) = send(
        &router,
        "POST",
        "/allowance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2023-01-01", "classification": "salary" },
            "year": 2024,
            "as_of": { "seconds": 1738368000, "nanoseconds": 0 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowance["status"], "full_year");
}

#[tokio::test]
async fn test_allowance_rejects_bad_as_of() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/allowance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2023-01-01", "classification": "salary" },
            "year": 2024,
            "as_of": "next tuesday"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_carryover_counts_prior_year_sick_usage() {
    let router = create_router_for_test();
    let entry = |date: &str, entry_type: &str, amount: &str| {
        json!({
            "id": uuid::Uuid::new_v4(),
            "employee_id": "emp_001",
            "date": date,
            "entry_type": entry_type,
            "amount": amount,
            "track": "salary",
            "created_at": "2025-01-01T00:00:00Z",
            "created_by": "hr"
        })
    };

    let (status, result) = send(
        &router,
        "POST",
        "/carryover",
        Some(json!({
            "year": 2026,
            "prior_year_entries": [
                entry("2025-03-01", "sick", "1.5"),
                entry("2025-09-01", "sick", "0.5"),
                entry("2025-10-01", "pto", "4"),
                entry("2024-10-01", "sick", "3")
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["year"], 2026);
    assert_eq!(field_decimal(&result["carryover"]), decimal("3"));
}

#[tokio::test]
async fn test_balance_empty_ledger_equals_allowance_plus_carryover() {
    let router = create_router_for_test();
    let (status, balance) = send(
        &router,
        "POST",
        "/balance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2023-01-01", "classification": "salary" },
            "year": 2024,
            "as_of": "2025-02-01",
            "applied_carryover": "2.5"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&balance["pto_balance"]), decimal("15"));
    assert_eq!(field_decimal(&balance["sick_balance"]), decimal("7.5"));
}

// =============================================================================
// SECTION 2: Ledger Lifecycle
// =============================================================================

#[tokio::test]
async fn test_record_edit_void_lifecycle() {
    let router = create_router_for_test();

    let (status, entry) = record(
        &router,
        "emp_001",
        json!({ "date": "2026-03-02", "entry_type": "PTO", "amount": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["entry_type"], "pto");
    assert_eq!(entry["created_by"], "hr_admin");
    let entry_id = entry["id"].as_str().unwrap().to_string();

    let (status, edited) = send(
        &router,
        "PATCH",
        &format!("/employees/emp_001/ledger/{}", entry_id),
        Some(json!({ "actor": "manager", "patch": { "amount": 1.5, "note": "half day back" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_decimal(&edited["amount"]), decimal("1.5"));
    assert_eq!(edited["created_by"], "hr_admin");
    assert_eq!(edited["last_modified_by"], "manager");

    let report = balance_report(&router, "emp_001", "year=2026").await;
    let allowance_pto = field_decimal(&report["allowance"]["pto_days"]);
    assert_eq!(
        field_decimal(&report["balance"]["pto_balance"]),
        allowance_pto - decimal("1.5")
    );

    let (status, voided) = send(
        &router,
        "DELETE",
        &format!("/employees/emp_001/ledger/{}?actor=manager", entry_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(voided["voided_by"], "manager");

    let report = balance_report(&router, "emp_001", "year=2026").await;
    assert_eq!(field_decimal(&report["balance"]["pto_balance"]), allowance_pto);
    assert_eq!(report["entries_counted"], 0);

    let (status, ledger) = send(&router, "GET", "/employees/emp_001/ledger", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ledger.as_array().unwrap().len(), 1);

    let (status, error) = send(
        &router,
        "PATCH",
        &format!("/employees/emp_001/ledger/{}", entry_id),
        Some(json!({ "actor": "manager", "patch": { "amount": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "ENTRY_VOIDED");
}

#[tokio::test]
async fn test_record_rejects_invalid_entries() {
    let router = create_router_for_test();

    let (status, error) = record(
        &router,
        "emp_001",
        json!({ "date": "2026-03-02", "entry_type": "Vacation", "amount": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "UNKNOWN_ENTRY_TYPE");

    let (status, error) = record(
        &router,
        "emp_001",
        json!({ "date": "2026-03-02", "entry_type": "Sick", "amount": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_LEDGER_ENTRY");

    let (status, error) = record(
        &router,
        "emp_404",
        json!({ "date": "2026-03-02", "entry_type": "Sick", "amount": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");

    let (_, ledger) = send(&router, "GET", "/employees/emp_001/ledger", None).await;
    assert!(ledger.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_unknown_entry_returns_404() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "PATCH",
        &format!("/employees/emp_001/ledger/{}", uuid::Uuid::new_v4()),
        Some(json!({ "actor": "hr", "patch": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "ENTRY_NOT_FOUND");
}

#[tokio::test]
async fn test_debit_then_adjustment_restores_balance() {
    let router = create_router_for_test();
    let before = balance_report(&router, "emp_001", "year=2026").await;

    record(
        &router,
        "emp_001",
        json!({ "date": "2026-04-06", "entry_type": "PTO", "amount": 3.25 }),
    )
    .await;
    record(
        &router,
        "emp_001",
        json!({ "date": "2026-04-07", "entry_type": "PTO Adjustment", "amount": 3.25 }),
    )
    .await;

    let after = balance_report(&router, "emp_001", "year=2026").await;
    assert_eq!(
        field_decimal(&after["balance"]["pto_balance"]),
        field_decimal(&before["balance"]["pto_balance"])
    );
    assert_eq!(after["entries_counted"], 2);
}

// =============================================================================
// SECTION 3: Carryover Application
// =============================================================================

#[tokio::test]
async fn test_apply_carryover_once() {
    let router = create_router_for_test();
    record(
        &router,
        "emp_001",
        json!({ "date": "2025-05-12", "entry_type": "Sick", "amount": 2 }),
    )
    .await;

    let report = balance_report(&router, "emp_001", "year=2026").await;
    assert_eq!(field_decimal(&report["suggested_carryover"]), decimal("3"));
    assert!(warning_codes(&report).contains(&"CARRYOVER_NOT_APPLIED".to_string()));

    let (status, profile) = send(
        &router,
        "POST",
        "/employees/emp_001/carryover/2026",
        Some(json!({ "actor": "hr_admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field_decimal(&profile["sick_carryover_overrides"]["2026"]),
        decimal("3")
    );

    let (status, error) = send(
        &router,
        "POST",
        "/employees/emp_001/carryover/2026",
        Some(json!({ "actor": "hr_admin", "amount": "5" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CARRYOVER_ALREADY_APPLIED");

    let report = balance_report(&router, "emp_001", "year=2026").await;
    assert_eq!(field_decimal(&report["applied_carryover"]), decimal("3"));
    assert_eq!(field_decimal(&report["balance"]["sick_balance"]), decimal("8"));
}

#[tokio::test]
async fn test_carryover_before_program_start_is_zero() {
    let router = create_router_for_test();
    let report = balance_report(&router, "emp_001", "year=2024").await;
    assert_eq!(field_decimal(&report["suggested_carryover"]), Decimal::ZERO);
    assert_eq!(report["allowance"]["status"], "full_year");
}

// =============================================================================
// SECTION 4: Transition Years and Rehires
// =============================================================================

#[tokio::test]
async fn test_transition_year_requires_track() {
    let router = create_router_for_test();

    let (status, error) = record(
        &router,
        "emp_002",
        json!({ "date": "2026-02-02", "entry_type": "PTO", "amount": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TRACK_REQUIRED");

    let (status, _) = record(
        &router,
        "emp_002",
        json!({ "date": "2026-02-02", "entry_type": "PTO", "amount": 1, "track": "hourly" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let salary = balance_report(&router, "emp_002", "year=2026").await;
    assert_eq!(salary["classification"], "transition");
    assert_eq!(salary["track"], "salary");
    assert_eq!(salary["entries_counted"], 0);

    let hourly = balance_report(&router, "emp_002", "year=2026&track=hourly").await;
    assert_eq!(hourly["track"], "hourly");
    assert_eq!(hourly["entries_counted"], 1);
}

#[tokio::test]
async fn test_pure_year_rejects_wrong_track() {
    let router = create_router_for_test();

    let (status, error) = record(
        &router,
        "emp_002",
        json!({ "date": "2025-02-03", "entry_type": "PTO", "amount": 1, "track": "salary" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TRACK_MISMATCH");
}

#[tokio::test]
async fn test_rehire_forfeits_earlier_entries() {
    let router = create_router_for_test();
    record(
        &router,
        "emp_003",
        json!({ "date": "2026-01-20", "entry_type": "Sick", "amount": 2 }),
    )
    .await;
    record(
        &router,
        "emp_003",
        json!({ "date": "2026-05-04", "entry_type": "Sick", "amount": 1 }),
    )
    .await;

    let report = balance_report(&router, "emp_003", "year=2026").await;
    assert_eq!(report["entries_counted"], 1);
    assert_eq!(field_decimal(&report["suggested_carryover"]), Decimal::ZERO);
    assert!(warning_codes(&report).contains(&"REHIRED_IN_YEAR".to_string()));

    let (_, ledger) = send(&router, "GET", "/employees/emp_003/ledger", None).await;
    assert_eq!(ledger.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_archived_period_year_keeps_its_balance() {
    let router = create_router_for_test();
    let (status, _) = record(
        &router,
        "emp_003",
        json!({ "date": "2024-03-05", "entry_type": "Sick", "amount": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let report = balance_report(&router, "emp_003", "year=2024").await;
    assert_eq!(report["allowance"]["status"], "full_year");
    assert_eq!(report["entries_counted"], 1);
    assert_eq!(field_decimal(&report["balance"]["sick_balance"]), decimal("4"));
    assert_eq!(field_decimal(&report["balance"]["pto_balance"]), decimal("15"));
}

#[tokio::test]
async fn test_stateless_balance_rejects_track_outside_year_classification() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/balance",
        Some(json!({
            "profile": { "employee_id": "x", "hire_date": "2020-01-06", "classification": "hourly" },
            "year": 2025,
            "track": "salary"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TRACK_MISMATCH");
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/balance")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/carryover")
                .body(Body::from(r#"{ "year": 2026 }"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_report_for_unknown_employee_returns_404() {
    let router = create_router_for_test();
    let (status, error) = send(&router, "GET", "/employees/nobody/balance?year=2026", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_rehire_endpoint_starts_new_period() {
    let router = create_router_for_test();
    record(
        &router,
        "emp_001",
        json!({ "date": "2026-01-14", "entry_type": "Sick", "amount": 1 }),
    )
    .await;

    let (status, profile) = send(
        &router,
        "POST",
        "/employees/emp_001/rehire",
        Some(json!({
            "actor": "hr_admin",
            "terminated_on": "2026-02-27",
            "rehired_on": "2026-05-04"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["hire_date"], "2026-05-04");
    assert_eq!(profile["employment_periods"][0]["hired_on"], "2020-01-06");

    let report = balance_report(&router, "emp_001", "year=2026").await;
    assert_eq!(report["entries_counted"], 0);
    assert_eq!(field_decimal(&report["balance"]["sick_balance"]), field_decimal(&report["allowance"]["sick_days"]));

    let (status, error) = send(
        &router,
        "POST",
        "/employees/emp_001/rehire",
        Some(json!({
            "actor": "hr_admin",
            "terminated_on": "2026-06-30",
            "rehired_on": "2026-06-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_DATE");
}
