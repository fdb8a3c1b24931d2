//! Operational error reporting.
//!
//! [`ErrorReporter`] is the one collaborator allowed to swallow its own
//! failures. Reporting is best-effort: `report` has no error channel, and
//! implementations must log and drop anything that goes wrong while
//! recording. Callers still propagate the original error themselves.

use async_trait::async_trait;
use serde_json::Value;

/// One step-tagged infrastructure fault.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// Component that hit the fault (`completion_sweeper`, `access_evaluator`).
    pub component: &'static str,
    /// Step inside the component (`complete_overdue`, `load_subscription`, ...).
    pub step: &'static str,
    pub message: String,
    pub context: Value,
}

impl ErrorReport {
    pub fn new(component: &'static str, step: &'static str, message: impl Into<String>) -> Self {
        Self {
            component,
            step,
            message: message.into(),
            context: Value::Object(Default::default()),
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }
}

/// Best-effort, non-propagating error sink.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    async fn report(&self, report: ErrorReport);
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

#[async_trait]
impl ErrorReporter for NoopReporter {
    async fn report(&self, _report: ErrorReport) {}
}
