//! Price Stream Binary
//!
//! Starts the live price feed core: connects to the price feed
//! WebSocket, reconciles snapshots, and publishes ordered views on the
//! broadcast hub for display consumers.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin price-stream
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRICE_FEED_HOST`: Host (and port) of the feed server
//!
//! ## Optional
//! - `PRICE_FEED_PATH`: WebSocket path (default: /ws)
//! - `PRICE_FEED_SECURE`: Use wss/https schemes (default: false)
//! - `PRICE_FEED_RECONNECT_DELAY_MS`: Reconnect delay (default: 3000)
//! - `PRICE_FEED_RECONNECT_DELAY_MAX_MS`: Delay ceiling (default: 3000)
//! - `PRICE_FEED_RECONNECT_MULTIPLIER`: Delay growth (default: 1.0)
//! - `PRICE_FEED_RECONNECT_JITTER`: Jitter fraction (default: 0.0)
//! - `PRICE_FEED_MAX_RECONNECT_ATTEMPTS`: 0 = unlimited (default: 0)
//! - `ORDERS_BASE_URL`: Trading backend base URL (default: derived from host)
//! - `ORDERS_AUTH_TOKEN`: Bearer token for order history (default: none)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use price_stream::application::services::ReconcileService;
use price_stream::infrastructure::telemetry;
use price_stream::{
    DashboardConfig, FeedClient, FeedClientConfig, FeedEvent, ReconnectConfig, ViewHub,
    ViewHubConfig,
};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    telemetry::init();

    tracing::info!("starting price stream");

    let config = DashboardConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();

    let hub = Arc::new(ViewHub::new(ViewHubConfig {
        views_capacity: config.hub.views_capacity,
        intents_capacity: config.hub.intents_capacity,
    }));

    let (feed_tx, feed_rx) = mpsc::channel::<FeedEvent>(1024);

    let feed_config = FeedClientConfig {
        url: config.endpoint.url(),
        reconnect: ReconnectConfig::from_feed_settings(&config.feed),
    };
    let feed_client = Arc::new(FeedClient::new(
        feed_config,
        feed_tx,
        shutdown_token.clone(),
    ));

    let reconcile_service =
        ReconcileService::new(feed_rx, Arc::clone(&hub), shutdown_token.clone());

    let service_handle = tokio::spawn(reconcile_service.run());

    let feed_client_clone = Arc::clone(&feed_client);
    let feed_handle = tokio::spawn(async move {
        if let Err(e) = feed_client_clone.run().await {
            tracing::error!(error = %e, "feed client error");
        }
    });

    tracing::info!("price stream ready");

    await_shutdown(shutdown_token).await;

    let _ = tokio::time::timeout(SHUTDOWN_TIMEOUT, async {
        let _ = feed_handle.await;
        let _ = service_handle.await;
    })
    .await;

    tracing::info!("price stream stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &DashboardConfig) {
    tracing::info!(
        feed_url = %config.endpoint.url(),
        reconnect_delay_ms = config.feed.reconnect_delay_initial.as_millis(),
        max_reconnect_attempts = config.feed.max_reconnect_attempts,
        orders_base_url = %config.orders.base_url,
        "configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
