//! Performance benchmarks for the leave engine.
//!
//! Covers the pure balance fold over growing ledgers, the full balance
//! report through the engine, and the report endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;
use uuid::Uuid;

use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::compute_balance;
use leave_engine::clock::FixedClock;
use leave_engine::config::ConfigLoader;
use leave_engine::directory::InMemoryDirectory;
use leave_engine::engine::LeaveEngine;
use leave_engine::ledger::{InMemoryLedgerStore, LedgerStore};
use leave_engine::models::{
    Allowance, AllowanceStatus, Classification, EmployeePolicyProfile, LeaveTrack, LedgerEntry,
    LedgerEntryType,
};

/// Builds `count` entries spread over 2025 and 2026.
fn create_ledger(count: usize) -> Vec<LedgerEntry> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let types = [
        LedgerEntryType::Pto,
        LedgerEntryType::Sick,
        LedgerEntryType::Comp,
        LedgerEntryType::PtoAdjustment,
        LedgerEntryType::SickAdjustment,
    ];

    (0..count)
        .map(|i| LedgerEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_bench".to_string(),
            date: start + Duration::days((i % 730) as i64),
            entry_type: types[i % types.len()],
            amount: Decimal::new(25 + (i % 8) as i64 * 25, 2),
            note: String::new(),
            track: LeaveTrack::Salary,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            created_by: "bench".to_string(),
            last_modified_at: None,
            last_modified_by: None,
            voided_at: None,
            voided_by: None,
        })
        .collect()
}

/// Creates an engine whose ledger holds `count` entries for `emp_bench`.
fn create_engine(count: usize) -> LeaveEngine {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let profile = EmployeePolicyProfile::new(
        "emp_bench",
        NaiveDate::from_ymd_opt(2019, 5, 6).unwrap(),
        Classification::Salary,
    );
    let store = Arc::new(InMemoryLedgerStore::new());
    for entry in create_ledger(count) {
        store.insert(entry).unwrap();
    }

    LeaveEngine::new(
        config.policy().clone(),
        Arc::new(InMemoryDirectory::with_profiles([profile])),
        store,
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap(),
        )),
    )
}

/// Benchmark: balance fold over ledgers of increasing size.
fn bench_compute_balance(c: &mut Criterion) {
    let allowance = Allowance {
        pto_days: Decimal::new(15, 0),
        sick_days: Decimal::new(5, 0),
        status: AllowanceStatus::FullYear,
    };

    let mut group = c.benchmark_group("compute_balance");
    for size in [10usize, 100, 1_000, 10_000] {
        let ledger = create_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("entries", size), &ledger, |b, ledger| {
            b.iter(|| compute_balance(black_box(ledger), &allowance, Decimal::new(3, 0)))
        });
    }
    group.finish();
}

/// Benchmark: full balance report including carryover and audit trace.
fn bench_balance_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_report");
    for size in [100usize, 1_000, 5_000] {
        let engine = create_engine(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("entries", size), &engine, |b, engine| {
            b.iter(|| black_box(engine.balance_report("emp_bench", 2026, None).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: `GET /employees/:employee_id/balance` end to end.
fn bench_report_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(create_engine(1_000)));

    c.bench_function("report_endpoint_1000_entries", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/employees/emp_bench/balance?year=2026")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_balance,
    bench_balance_report,
    bench_report_endpoint,
);
criterion_main!(benches);
