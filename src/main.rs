//! Pavilion Server — venue access management core.
//!
//! Main entry point that wires configuration, the database, the service
//! layer, and the domain event fan-out together.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use pavilion_core::config::AppConfig;
use pavilion_core::error::AppError;
use pavilion_database::DatabasePool;
use pavilion_database::postgres::{BookingRepository, CrowdRepository, QueueRepository};
use pavilion_service::{
    BookingService, CrowdService, EventBroadcaster, QueueService, TokenService,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("PAVILION_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Pavilion v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    pavilion_database::migration::run_migrations(db.pool()).await?;

    let events = Arc::new(EventBroadcaster::new(config.events.channel_capacity));

    // The transport layer (HTTP, gate scanners, staff terminals) mounts
    // on top of these services.
    let _bookings = BookingService::new(
        Arc::new(BookingRepository::new(db.pool().clone())),
        Arc::new(TokenService::new()),
    );
    let _queues = QueueService::new(
        Arc::new(QueueRepository::new(db.pool().clone())),
        events.clone(),
    );
    let _crowd = CrowdService::new(
        Arc::new(CrowdRepository::new(db.pool().clone())),
        events.clone(),
    );

    // Until a transport is attached, log the event stream so operators
    // can watch the core work.
    let mut event_rx = events.subscribe();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            tracing::info!(event_id = %event.id, payload = ?event.payload, "Domain event");
        }
    });

    tracing::info!("Pavilion core ready");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutting down");
    event_log.abort();
    db.close().await;
    Ok(())
}
