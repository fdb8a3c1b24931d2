//! Integration tests for the database-backed error sink.

use agendly_core::telemetry::{ErrorReport, ErrorReporter};
use agendly_db::error_sink::DbErrorReporter;
use agendly_db::repositories::ErrorLogRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_persists_step_tagged_entry(pool: PgPool) {
    let reporter = DbErrorReporter::new(pool.clone());
    reporter
        .report(
            ErrorReport::new("completion_sweeper", "complete_overdue", "connection reset")
                .with_context(json!({ "reference_time": "2025-01-15T12:00:00-03:00" })),
        )
        .await;

    let entries = ErrorLogRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].component, "completion_sweeper");
    assert_eq!(entries[0].step, "complete_overdue");
    assert_eq!(entries[0].message, "connection reset");
    assert_eq!(entries[0].context["reference_time"], "2025-01-15T12:00:00-03:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_swallows_store_failures(pool: PgPool) {
    sqlx::query("DROP TABLE error_logs")
        .execute(&pool)
        .await
        .unwrap();

    // Must return normally even though the insert fails.
    DbErrorReporter::new(pool)
        .report(ErrorReport::new("access_evaluator", "load_subscription", "timeout"))
        .await;
}
