//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when you want the server without the sample-data seeding that the
//! workspace's main `bloodlink-run` binary offers.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use bloodlink_core::CoreConfig;

/// Main entry point for the bloodlink REST API server
///
/// # Environment Variables
/// - `BLOODLINK_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `BLOODLINK_DATA_DIR`, `BLOODLINK_MAX_DISTANCE_KM`, `NGO_*`: see `CoreConfig::from_lookup`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("bloodlink_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("BLOODLINK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let cfg = Arc::new(CoreConfig::from_lookup(|key| std::env::var(key).ok())?);

    tracing::info!(
        "-- Starting bloodlink REST API on {} (data dir: {})",
        addr,
        cfg.data_dir().display()
    );

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
