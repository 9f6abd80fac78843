//! Cache Engine admin host
//!
//! Registers the configured caches with the process-wide manager, runs the
//! expiry sweeper and serves the administrative HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_engine::api::{create_router, AppState};
use cache_engine::{AdminConfig, CacheManager, InMemoryCache};

/// Main entry point for the admin host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Register one cache per configured name with the global manager
/// 4. Start the background expiry sweeper
/// 5. Serve the admin router until SIGINT/SIGTERM
/// 6. Stop the sweeper, waiting for an in-flight sweep
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache engine admin host");

    let config = AdminConfig::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: caches={:?}, max_size={}, ttl={}ms, port={}, cleanup_interval={}m",
        config.cache_names,
        config.cache.max_size(),
        config.cache.expiration_millis(),
        config.server_port,
        config.cache.cleanup_interval_minutes()
    );

    let manager = CacheManager::global();
    for name in &config.cache_names {
        let cache: Arc<InMemoryCache<String, String>> =
            Arc::new(InMemoryCache::new(config.cache.clone()));
        manager.register_cache(name.clone(), cache);
    }

    manager.start(config.cache.cleanup_interval_minutes())?;

    let app = create_router(AppState::new(manager.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Stopping blocks while a sweep finishes, keep it off the async workers.
    tokio::task::spawn_blocking(move || manager.stop()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
