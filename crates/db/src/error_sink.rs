//! [`ErrorReporter`] backed by the `error_logs` table.

use agendly_core::telemetry::{ErrorReport, ErrorReporter};
use async_trait::async_trait;

use crate::models::error_log::CreateErrorLog;
use crate::repositories::ErrorLogRepo;
use crate::DbPool;

/// Persists reports to `error_logs`. A failed insert is logged and dropped.
#[derive(Clone)]
pub struct DbErrorReporter {
    pool: DbPool,
}

impl DbErrorReporter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ErrorReporter for DbErrorReporter {
    async fn report(&self, report: ErrorReport) {
        let entry = CreateErrorLog {
            component: report.component.to_string(),
            step: report.step.to_string(),
            message: report.message,
            context: report.context,
        };

        if let Err(e) = ErrorLogRepo::insert(&self.pool, &entry).await {
            tracing::warn!(
                error = %e,
                component = %entry.component,
                step = %entry.step,
                "Failed to record error log entry",
            );
        }
    }
}
