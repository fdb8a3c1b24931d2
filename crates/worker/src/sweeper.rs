//! One completion sweep: move every overdue `scheduled` appointment to
//! `completed`.
//!
//! "Now" comes from the injected [`BusinessClock`] and is rendered in the
//! business timezone, so the result does not depend on the zone of the host
//! running the sweep. The transition is a single predicate UPDATE; a failed
//! sweep changes nothing and the next cycle picks the rows up again.

use std::sync::Arc;

use agendly_core::clock::BusinessClock;
use agendly_core::telemetry::{ErrorReport, ErrorReporter};
use agendly_db::repositories::AppointmentRepo;
use agendly_db::DbPool;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::json;

/// Component tag used in logs and error reports.
pub const COMPONENT: &str = "completion_sweeper";

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Failed to complete overdue appointments: {0}")]
    Store(#[from] sqlx::Error),
}

/// Outcome of a successful sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Rows moved from `scheduled` to `completed` by this sweep.
    pub completed: u64,
    /// The instant rows were compared against, in the business zone.
    pub reference_time: DateTime<Tz>,
}

impl SweepReport {
    /// RFC 3339 rendering of the reference time, with the business offset.
    pub fn timestamp(&self) -> String {
        self.reference_time.to_rfc3339()
    }

    pub fn message(&self) -> String {
        match self.completed {
            0 => "No overdue appointments to complete".to_string(),
            1 => "Marked 1 overdue appointment as completed".to_string(),
            n => format!("Marked {n} overdue appointments as completed"),
        }
    }
}

/// Runs completion sweeps against the appointment store.
#[derive(Clone)]
pub struct CompletionSweeper {
    pool: DbPool,
    clock: BusinessClock,
    reporter: Arc<dyn ErrorReporter>,
}

impl CompletionSweeper {
    pub fn new(pool: DbPool, clock: BusinessClock, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            pool,
            clock,
            reporter,
        }
    }

    pub fn clock(&self) -> &BusinessClock {
        &self.clock
    }

    /// How many appointments a sweep right now would complete.
    pub async fn overdue_count(&self) -> Result<i64, SweepError> {
        Ok(AppointmentRepo::count_overdue(&self.pool, self.clock.now_utc()).await?)
    }

    /// Perform one sweep.
    ///
    /// Store failures are logged, handed to the error reporter, and returned.
    /// Nothing is retried here.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        let reference_time = self.clock.now_local();
        let cutoff = reference_time.with_timezone(&Utc);

        match AppointmentRepo::complete_overdue(&self.pool, cutoff).await {
            Ok(completed) => {
                let report = SweepReport {
                    completed,
                    reference_time,
                };
                if completed > 0 {
                    tracing::info!(
                        completed,
                        reference_time = %report.timestamp(),
                        "Completion sweep: appointments completed",
                    );
                } else {
                    tracing::debug!(
                        reference_time = %report.timestamp(),
                        "Completion sweep: nothing overdue",
                    );
                }
                Ok(report)
            }
            Err(e) => {
                let reference = reference_time.to_rfc3339();
                tracing::error!(
                    step = "complete_overdue",
                    error = %e,
                    reference_time = %reference,
                    "Completion sweep failed",
                );
                self.reporter
                    .report(
                        ErrorReport::new(COMPONENT, "complete_overdue", e.to_string())
                            .with_context(json!({ "reference_time": reference })),
                    )
                    .await;
                Err(e.into())
            }
        }
    }
}
