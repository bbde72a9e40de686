//! Garage Service
//!
//! REST API for appointment booking, payments and service reminders.
//! Reads configuration from a TOML file (~/.config/garage-service/config.toml).

use std::sync::Arc;
use std::time::Instant;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use garage_service::application::{
    start_transfer_expiry_task, BookingService, ManualPaymentGateway, NotificationGenerator,
    PaymentService, SlotAllocator, TransferService,
};
use garage_service::domain::RepositoryProvider;
use garage_service::infrastructure::database::migrator::Migrator;
use garage_service::shared::{listen_for_os_signals, BackgroundTasks, ShutdownSignal};
use garage_service::{
    create_api_router, default_config_path, init_database, AppConfig, AppState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("GARAGE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            cfg
        }
    };

    info!("Starting Garage Service...");

    // Must be installed before the first metrics call
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from(&app_cfg.database);
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let slots = Arc::new(SlotAllocator::new(
        repos.clone(),
        app_cfg.booking.default_daily_limit,
    ));
    let booking = Arc::new(BookingService::new(repos.clone(), slots.clone()));
    let payments = Arc::new(PaymentService::new(
        repos.clone(),
        Arc::new(ManualPaymentGateway),
    ));
    let transfers = Arc::new(TransferService::new(
        repos.clone(),
        app_cfg.transfers.default_ttl_hours,
    ));

    let shutdown_signal = ShutdownSignal::new();
    tokio::spawn(listen_for_os_signals(shutdown_signal.clone()));

    // ── Background tasks ───────────────────────────────────────
    let mut background = BackgroundTasks::new(
        shutdown_signal.clone(),
        app_cfg.server.shutdown_timeout,
    );
    let generator = Arc::new(NotificationGenerator::new(
        repos.clone(),
        app_cfg.notifications.clone(),
    ));
    background.track(
        "notification-generator",
        generator.start(shutdown_signal.clone()),
    );
    background.track(
        "transfer-expiry",
        start_transfer_expiry_task(
            transfers.clone(),
            shutdown_signal.clone(),
            app_cfg.transfers.expiry_check_interval_secs,
        ),
    );

    // ── REST API ───────────────────────────────────────────────
    let state = AppState {
        repos,
        db: db.clone(),
        slots,
        booking,
        payments,
        transfers,
        started_at: Arc::new(Instant::now()),
    };
    let api_router = create_api_router(state, Some(prometheus_handle));

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });

    match tokio::spawn(async move { api_server.await }).await {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }

    // The server also stops on its own error; drain triggers the signal
    background.drain().await;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Garage Service shutdown complete");
    Ok(())
}
