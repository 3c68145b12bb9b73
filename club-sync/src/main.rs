use std::time::Duration;

use club_sync::config::Config;
use club_sync::error::BoxError;
use club_sync::scheduler::GroupSyncScheduler;
use club_sync::{AppState, api};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_sync=info,brivo_client=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting club-sync (env: {})", config.environment);
    if config.is_development() {
        tracing::warn!("Development mode: unset Brivo secrets fall back to placeholders");
    }

    let state = AppState::from_config(&config).await?;
    let shutdown = CancellationToken::new();

    let scheduler = GroupSyncScheduler::new(
        state.sync.clone(),
        Duration::from_secs(config.group_sync_interval_secs),
        shutdown.clone(),
    );
    let scheduler_handle = tokio::spawn(scheduler.run());

    let app = api::create_router(state);
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("club-sync HTTP listening on {http_addr}");

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
            }
            tracing::info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    scheduler_handle.await?;
    Ok(())
}
