//!
//! Booking core server for the Tripnest travel application.
//! Reads configuration from TOML file (~/.config/tripnest-booking/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use tripnest_booking::application::{AvailabilityService, ExpirySweeper, ReservationService};
use tripnest_booking::domain::RepositoryProvider;
use tripnest_booking::shared::shutdown::ShutdownCoordinator;
use tripnest_booking::{create_api_router, default_config_path, AppConfig, InMemoryStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
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
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Tripnest booking core...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let storage = Arc::new(InMemoryStorage::new());
    if app_cfg.server.seed_demo_data {
        storage.seed_demo_data();
        info!("🏨 Demo rooms registered for hotel HTL-DEMO");
    }
    let repos: Arc<dyn RepositoryProvider> = storage;

    // ── Services ───────────────────────────────────────────────
    let availability = Arc::new(AvailabilityService::new(repos.clone()));
    let reservations = Arc::new(
        ReservationService::new(repos.clone()).with_config(app_cfg.reservation_config()),
    );

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Start the occupancy sweeper
    let sweeper = ExpirySweeper::new(repos.clone()).with_config(app_cfg.sweeper_config());
    sweeper.start(shutdown_signal.clone());

    // ── REST API server with graceful shutdown ─────────────────
    let api_router = create_api_router(repos, availability, reservations, prometheus_handle);

    let api_addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    if let Err(e) = api_server.await {
        error!("REST API server error: {}", e);
    }

    info!("👋 Tripnest booking core shutdown complete");
    Ok(())
}
