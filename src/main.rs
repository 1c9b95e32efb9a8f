use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{Mutex, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vantage_sync::clock::{AssumeSynced, ClockOracle, CommandClockOracle};
use vantage_sync::common::{AppState, SyncStatus};
use vantage_sync::config::{Config, LogFormat};
use vantage_sync::routes;
use vantage_sync::station::command::{FixtureRunner, SystemRunner};
use vantage_sync::station::{CommandRunner, StationClient};
use vantage_sync::store::{DbStore, WeatherStore};
use vantage_sync::sync::{self, PersistenceGate, SyncWorker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (fail-fast)
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,vantage_sync=debug".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("Starting vantage-sync...");
    tracing::info!(
        deployment = ?config.deployment,
        host = %config.api_host,
        port = config.api_port,
        interval_secs = config.sync_interval_seconds,
        precision = ?config.archive_request_precision,
        require_clock_sync = config.require_clock_sync,
        "Configuration loaded"
    );

    // Connect to database (fail-fast)
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Migrations completed");

    let db_store = DbStore::new(db);
    db_store.check_collections().await?;
    let store: Arc<dyn WeatherStore> = Arc::new(db_store);

    // Station command runner
    let runner: Arc<dyn CommandRunner> = match &config.station_fixture_dir {
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "Reading station output from fixture files");
            Arc::new(FixtureRunner::new(dir.clone()))
        }
        None => Arc::new(SystemRunner::new(config.command_timeout_seconds)),
    };
    let station = StationClient::new(&config, Arc::clone(&runner));

    let oracle: Arc<dyn ClockOracle> = if config.require_clock_sync {
        Arc::new(CommandClockOracle::new(
            Arc::new(SystemRunner::new(config.command_timeout_seconds)),
            config.clock_sync_command.clone(),
        ))
    } else {
        tracing::warn!("Clock sync check disabled, live weather is always stored");
        Arc::new(AssumeSynced)
    };
    let gate = PersistenceGate::new(oracle, config.require_clock_sync);

    // Probe the archive interval (fail-fast: no station, no service)
    let period = station.archive_period().await?;
    tracing::info!(minutes = period, "Station archive period");
    if config.sync_interval_seconds > u64::from(period) * 60 {
        tracing::warn!(
            interval_secs = config.sync_interval_seconds,
            period_minutes = period,
            "Sync interval is longer than the archive period, catch-up batches will hold several records"
        );
    }

    let status = Arc::new(RwLock::new(SyncStatus {
        archive_period_minutes: Some(period),
        ..SyncStatus::default()
    }));

    let mut worker = SyncWorker::new(station, Arc::clone(&store), gate, Arc::clone(&status));
    worker.bootstrap().await?;
    tracing::info!(watermark = ?worker.watermark(), "Bootstrap complete");

    // Spawn background sync (fire-and-forget, non-blocking)
    let worker = Arc::new(Mutex::new(worker));
    tokio::spawn(sync::scheduler::run_sync(
        worker,
        Arc::clone(&status),
        config.sync_interval_seconds,
    ));

    // Create application state
    let addr = config.bind_address();
    let state = AppState::new(store, status);

    // Build router
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
