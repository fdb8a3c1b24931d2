use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use agendly_api::config::ServerConfig;
use agendly_api::router::build_app_router;
use agendly_api::state::AppState;
use agendly_db::error_sink::DbErrorReporter;
use agendly_worker::schedule::{run_periodic, shutdown_signal};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agendly_api=debug,agendly_worker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %config.lifecycle.timezone,
        past_due_grace_days = config.lifecycle.access.past_due_grace_days,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = agendly_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    agendly_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    agendly_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- App state ---
    let clock = config.lifecycle.business_clock();
    let reporter = Arc::new(DbErrorReporter::new(pool.clone()));
    let state = AppState::new(pool, config.clone(), clock, reporter);

    // --- In-process completion sweep (optional) ---
    let sweep_cancel = CancellationToken::new();
    let sweep_handle = (config.sweep_interval_secs > 0).then(|| {
        tokio::spawn(run_periodic(
            state.sweeper.clone(),
            Duration::from_secs(config.sweep_interval_secs),
            sweep_cancel.clone(),
        ))
    });
    if sweep_handle.is_none() {
        tracing::info!("In-process completion sweep disabled; relying on external scheduler");
    }

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    if let Some(handle) = sweep_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Completion sweep loop stopped");
    }

    tracing::info!("Graceful shutdown complete");
}
