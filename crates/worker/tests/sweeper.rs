//! Integration tests for the completion sweeper against a migrated database.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agendly_core::appointment::AppointmentStatus;
use agendly_core::clock::{parse_timezone, BusinessClock};
use agendly_core::telemetry::{ErrorReport, ErrorReporter, NoopReporter};
use agendly_core::types::DbId;
use agendly_db::models::appointment::CreateAppointment;
use agendly_db::models::business::CreateBusiness;
use agendly_db::repositories::{AppointmentRepo, BusinessRepo};
use agendly_worker::schedule::run_periodic;
use agendly_worker::sweeper::{CompletionSweeper, SweepError};
use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingReporter {
    reports: Mutex<Vec<ErrorReport>>,
}

#[async_trait]
impl ErrorReporter for RecordingReporter {
    async fn report(&self, report: ErrorReport) {
        self.reports.lock().unwrap().push(report);
    }
}

/// Business clock frozen at a Sao Paulo wall-clock time on 2025-01-15.
fn sao_paulo_clock(hour: u32) -> BusinessClock {
    let tz = parse_timezone("America/Sao_Paulo").unwrap();
    let local = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    let now = BusinessClock::system(tz).localize(local).unwrap();
    BusinessClock::fixed(now, tz)
}

async fn seed_business(pool: &PgPool) -> DbId {
    BusinessRepo::create(
        pool,
        &CreateBusiness {
            owner_user_id: 11,
            name: "Salao Aurora".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a `scheduled` appointment at a Sao Paulo wall-clock hour on 2025-01-15.
async fn seed_local(pool: &PgPool, clock: &BusinessClock, business_id: DbId, hour: u32) -> DbId {
    let local = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    AppointmentRepo::create(
        pool,
        &CreateAppointment {
            business_id,
            scheduled_at: clock.localize(local).unwrap(),
            status: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn status_of(pool: &PgPool, id: DbId) -> AppointmentStatus {
    AppointmentRepo::find_by_id(pool, id)
        .await
        .unwrap()
        .unwrap()
        .lifecycle_status()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_at_noon_completes_morning_and_keeps_afternoon(pool: PgPool) {
    let clock = sao_paulo_clock(12);
    let business_id = seed_business(&pool).await;
    let morning = seed_local(&pool, &clock, business_id, 9).await;
    let afternoon = seed_local(&pool, &clock, business_id, 15).await;

    let sweeper = CompletionSweeper::new(pool.clone(), clock, Arc::new(NoopReporter));
    assert_eq!(sweeper.overdue_count().await.unwrap(), 1);

    let report = sweeper.run().await.unwrap();

    assert_eq!(report.completed, 1);
    assert_eq!(report.timestamp(), "2025-01-15T12:00:00-03:00");
    assert_eq!(status_of(&pool, morning).await, AppointmentStatus::Completed);
    assert_eq!(status_of(&pool, afternoon).await, AppointmentStatus::Scheduled);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_is_idempotent(pool: PgPool) {
    let clock = sao_paulo_clock(18);
    let business_id = seed_business(&pool).await;
    for hour in [8, 10, 14] {
        seed_local(&pool, &clock, business_id, hour).await;
    }

    let sweeper = CompletionSweeper::new(pool, clock, Arc::new(NoopReporter));
    assert_eq!(sweeper.run().await.unwrap().completed, 3);
    assert_eq!(sweeper.run().await.unwrap().completed, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_sweeps_match_single_sweep(pool: PgPool) {
    let clock = sao_paulo_clock(23);
    let business_id = seed_business(&pool).await;
    for hour in 0..20 {
        seed_local(&pool, &clock, business_id, hour).await;
    }

    let first = CompletionSweeper::new(pool.clone(), clock.clone(), Arc::new(NoopReporter));
    let second = first.clone();
    let (a, b) = tokio::join!(first.run(), second.run());

    assert_eq!(a.unwrap().completed + b.unwrap().completed, 20);
    assert_eq!(first.overdue_count().await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_failure_is_reported_once_and_returned(pool: PgPool) {
    sqlx::query("DROP TABLE appointments")
        .execute(&pool)
        .await
        .unwrap();

    let reporter = Arc::new(RecordingReporter::default());
    let sweeper = CompletionSweeper::new(pool, sao_paulo_clock(12), reporter.clone());

    assert_matches!(sweeper.run().await, Err(SweepError::Store(_)));

    let reports = reporter.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].component, "completion_sweeper");
    assert_eq!(reports[0].step, "complete_overdue");
    assert_eq!(reports[0].context["reference_time"], "2025-01-15T12:00:00-03:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn periodic_loop_sweeps_and_stops_on_cancel(pool: PgPool) {
    let clock = sao_paulo_clock(12);
    let business_id = seed_business(&pool).await;
    let morning = seed_local(&pool, &clock, business_id, 9).await;

    let sweeper = CompletionSweeper::new(pool.clone(), clock, Arc::new(NoopReporter));
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(run_periodic(
        sweeper,
        Duration::from_millis(20),
        cancel.clone(),
    ));

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop should stop after cancellation")
        .unwrap();

    assert_eq!(status_of(&pool, morning).await, AppointmentStatus::Completed);
}
