use std::sync::Arc;

use agendly_core::clock::BusinessClock;
use agendly_core::telemetry::ErrorReporter;
use agendly_worker::sweeper::CompletionSweeper;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agendly_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Clock anchored to the business timezone.
    pub clock: BusinessClock,
    /// Completion sweeper behind the HTTP trigger.
    pub sweeper: CompletionSweeper,
    /// Best-effort sink for infrastructure faults.
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    /// Wire every component from one pool, config, clock and reporter.
    pub fn new(
        pool: agendly_db::DbPool,
        config: ServerConfig,
        clock: BusinessClock,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let sweeper = CompletionSweeper::new(pool.clone(), clock.clone(), Arc::clone(&reporter));
        Self {
            pool,
            config: Arc::new(config),
            clock,
            sweeper,
            reporter,
        }
    }
}
