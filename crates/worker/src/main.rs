use std::sync::Arc;
use std::time::Duration;

use agendly_db::error_sink::DbErrorReporter;
use agendly_worker::config::WorkerConfig;
use agendly_worker::schedule::{run_periodic, shutdown_signal};
use agendly_worker::sweeper::CompletionSweeper;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agendly_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env().expect("Invalid worker configuration");
    tracing::info!(
        timezone = %config.lifecycle.timezone,
        interval_secs = config.sweep_interval.as_secs(),
        run_once = config.run_once,
        "Loaded worker configuration"
    );

    // --- Database ---
    let pool = agendly_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    let sweeper = CompletionSweeper::new(
        pool.clone(),
        config.lifecycle.business_clock(),
        Arc::new(DbErrorReporter::new(pool)),
    );

    if config.run_once {
        match sweeper.run().await {
            Ok(report) => {
                tracing::info!(
                    completed = report.completed,
                    timestamp = %report.timestamp(),
                    "Single sweep finished"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Single sweep failed");
                std::process::exit(1);
            }
        }
        return;
    }

    match sweeper.overdue_count().await {
        Ok(pending) => tracing::info!(pending, "Overdue appointments at startup"),
        Err(e) => tracing::warn!(error = %e, "Could not count overdue appointments at startup"),
    }

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(run_periodic(sweeper, config.sweep_interval, cancel.clone()));

    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    tracing::info!("Worker stopped");
}
