mod config;
mod cursor;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod repository;
mod startup;
mod usecase;

use std::future::IntoFuture;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Notify};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

use repository::{DatabaseHealth, PgWorkerRepository};
use usecase::AvailableShifts;

#[derive(Clone)]
pub struct AppState {
    pub available_shifts: AvailableShifts,
    pub database: Arc<dyn DatabaseHealth>,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,facilities_api=debug,tower_http=debug".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let pool = db::create_pool(
        &config.database_url,
        config.database_max_connections,
        config.database_min_connections,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to connect to postgres: {}", e);
        e
    })?;

    tracing::info!("Database pool created successfully");

    let metrics = Arc::new(handlers::setup_metrics_recorder()?);
    tracing::info!("Metrics recorder initialized");

    let repository = Arc::new(PgWorkerRepository::new(pool));

    let state = Arc::new(AppState {
        available_shifts: AvailableShifts::new(repository.clone()),
        database: repository,
        metrics,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.server_port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // Once a signal arrives, in-flight requests get the grace period to drain
    let draining = Arc::new(Notify::new());
    let signal = draining.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            signal.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = async {
            draining.notified().await;
            tokio::time::sleep(config.graceful_shutdown_period).await;
        } => {
            tracing::warn!(
                period = ?config.graceful_shutdown_period,
                "graceful shutdown period elapsed, dropping open connections"
            );
        }
    }

    tracing::info!("Server exited");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
