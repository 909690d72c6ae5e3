use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use bloodlink_core::{repositories::samples::seed_sample_donors, CoreConfig};

/// Main entry point for the bloodlink application
///
/// Serves the REST API (with Swagger UI at `/swagger-ui`) and, when asked to, seeds the donor
/// directory with the Dehradun sample donors before accepting requests.
///
/// # Environment Variables
/// - `BLOODLINK_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `BLOODLINK_DATA_DIR`: Directory for donor, request and contact storage (default: "blood_bank_data")
/// - `BLOODLINK_MAX_DISTANCE_KM`: Default search radius (default: 50)
/// - `BLOODLINK_SEED_SAMPLES`: `true` or `1` to seed sample donors into an empty directory
/// - `NGO_NAME`, `NGO_EMAIL`, `NGO_PHONE`, `NGO_EMERGENCY_EMAIL`, `NGO_DESCRIPTION`
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, seeding, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloodlink=info".parse()?)
                .add_directive("bloodlink_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("BLOODLINK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let cfg = Arc::new(CoreConfig::from_lookup(|key| std::env::var(key).ok())?);
    let state = AppState::new(cfg.clone());

    if seed_requested(std::env::var("BLOODLINK_SEED_SAMPLES").ok().as_deref()) {
        let created = seed_sample_donors(state.donor_service(), chrono::Utc::now())?;
        tracing::info!("seeded {} sample donors", created);
    }

    tracing::info!(
        "-- Starting bloodlink REST server on {} (data dir: {})",
        rest_addr,
        cfg.data_dir().display()
    );

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn seed_requested(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_requested() {
        assert!(seed_requested(Some("true")));
        assert!(seed_requested(Some(" 1 ")));
        assert!(!seed_requested(Some("false")));
        assert!(!seed_requested(None));
    }
}
