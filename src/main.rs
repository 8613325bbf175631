use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use api_shared::HealthService;
use swasthya_core::{
    CoreConfig, RecordService, constants::DEFAULT_REGISTRY_URL, registry_timeout_from_env_value,
};

/// Main entry point for the Swasthya service
///
/// Resolves configuration once, then serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `SWASTHYA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SWASTHYA_DATA_DIR`: Directory holding the JSON stores (default: "data", created if missing)
/// - `SWASTHYA_REGISTRY_URL`: Ayushman Bharat registry endpoint
/// - `SWASTHYA_REGISTRY_TIMEOUT_SECS`: Registry timeout in seconds (default: 5)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swasthya_run=info".parse()?)
                .add_directive("swasthya_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SWASTHYA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("SWASTHYA_DATA_DIR")
        .unwrap_or_else(|_| swasthya_core::DEFAULT_DATA_DIR.into());
    let registry_url =
        std::env::var("SWASTHYA_REGISTRY_URL").unwrap_or_else(|_| DEFAULT_REGISTRY_URL.into());
    let registry_timeout =
        registry_timeout_from_env_value(std::env::var("SWASTHYA_REGISTRY_TIMEOUT_SECS").ok())?;

    let cfg = CoreConfig::new(PathBuf::from(data_dir), registry_url, registry_timeout)?;
    cfg.ensure_data_dir()?;

    tracing::info!("++ Data directory {}", cfg.data_dir().display());
    tracing::info!(
        "++ Registry {} (timeout {:?})",
        cfg.registry_url(),
        cfg.registry_timeout()
    );

    let records = RecordService::new(Arc::new(cfg))?;
    let app = router(AppState::new(records));

    tracing::info!("++ Starting Swasthya REST on {}", rest_addr);
    tracing::info!("++ {}", HealthService::check_health().message);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Swasthya REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
