//! Vehicle inspection service
//!
//! REST API for SOAT pricing, payments and the vehicle registry.
//! Reads configuration from TOML (~/.config/inspection-service/config.toml,
//! or the path in `INSPECTION_CONFIG`).

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use inspection_service::application::{PaymentService, VehicleService};
use inspection_service::config::LoggingConfig;
use inspection_service::domain::RepositoryProvider;
use inspection_service::infrastructure::database::migrator::Migrator;
use inspection_service::shared::errors::{AppError, InfraError};
use inspection_service::shared::ShutdownSignal;
use inspection_service::{
    create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (app_cfg, load_error) = match AppConfig::load_or_init(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&app_cfg.logging);
    match load_error {
        None => info!(path = %config_path.display(), "Configuration loaded"),
        Some(e) => error!(error = %e, "Failed to load config, using defaults"),
    }

    info!("Starting vehicle inspection service...");

    // ── Prometheus recorder, before any metric is touched ──────
    let prometheus_handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed, /metrics disabled");
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from(&app_cfg.database);
    let db = init_database(&db_config).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        InfraError::from(e)
    })?;

    info!("Running database migrations...");
    Migrator::up(&db, None).await.map_err(|e| {
        error!(error = %e, "Failed to run migrations");
        InfraError::from(e)
    })?;
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let host = app_cfg.server.api_host.clone();
    let payment_service = Arc::new(PaymentService::new(repos.clone(), host.clone()));
    let vehicle_service = Arc::new(VehicleService::new(repos, host));

    let api_router = create_api_router(
        db.clone(),
        payment_service,
        vehicle_service,
        prometheus_handle,
    );

    // ── Shutdown ───────────────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    let server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });

    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server_task => {
            match result {
                Ok(Ok(())) => info!("REST API server stopped"),
                Ok(Err(e)) => error!(error = %e, "REST API server error"),
                Err(e) => error!(error = %e, "REST API server task panicked"),
            }
        }
        _ = shutdown.wait() => {
            let timeout = Duration::from_secs(app_cfg.server.shutdown_timeout);
            let drained = shutdown
                .drain(timeout, async {
                    let _ = (&mut server_task).await;
                })
                .await;
            if !drained {
                server_task.abort();
            }
        }
    }

    if let Err(e) = db.close().await {
        warn!(error = %e, "Error closing database connection");
    } else {
        info!("Database connection closed");
    }

    info!("Shutdown complete");
    Ok(())
}
