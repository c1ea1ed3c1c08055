//! Product Cache - read-through product lookup service
//!
//! Serves product records from Redis when present and falls back to MySQL on
//! a miss, writing the record back with a bounded TTL.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::create_router;
use product_cache::cache::{MemoryCache, ProductCache, RedisCache};
use product_cache::config::{CacheBackend, StoreBackend};
use product_cache::store::{MemoryProductStore, MySqlProductStore, ProductStore};
use product_cache::{spawn_cleanup_task, AppState, Config, ProductLookupService};

/// Main entry point for the product lookup service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache and store adapters (shared by every request)
/// 4. Start the memory-cache sweep when that backend is selected
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product lookup service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache={:?}, store={:?}, cache_ttl={}s, port={}, request_timeout={}s",
        config.cache_backend,
        config.store_backend,
        config.cache_ttl,
        config.server_port,
        config.request_timeout
    );

    let mut cleanup_handle: Option<JoinHandle<()>> = None;
    let cache: Arc<dyn ProductCache> = match config.cache_backend {
        CacheBackend::Redis => {
            let redis = RedisCache::connect(&config.redis_url(), config.redis_pool_size)
                .context("failed to configure Redis cache")?;
            info!("Redis cache at {} (db {})", config.redis_addr, config.redis_db);
            Arc::new(redis)
        }
        CacheBackend::Memory => {
            let memory = MemoryCache::new(config.memory_max_entries);
            cleanup_handle = Some(spawn_cleanup_task(
                memory.clone(),
                Duration::from_secs(config.cleanup_interval),
            ));
            info!("In-memory cache (max_entries={})", config.memory_max_entries);
            Arc::new(memory)
        }
    };

    let mut mysql: Option<Arc<MySqlProductStore>> = None;
    let store: Arc<dyn ProductStore> = match config.store_backend {
        StoreBackend::MySql => {
            let pool = Arc::new(
                MySqlProductStore::connect_lazy(
                    &config.database_url,
                    config.database_max_connections,
                )
                .context("failed to configure MySQL store")?,
            );
            mysql = Some(pool.clone());
            pool
        }
        StoreBackend::Memory => {
            Arc::new(load_memory_store(config.products_seed_file.as_deref()).await?)
        }
    };

    let lookup = ProductLookupService::with_ttl(cache, store, config.cache_ttl());
    let app = create_router(AppState::new(lookup), config.request_timeout());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    if let Some(pool) = mysql {
        pool.close().await;
    }
    info!("Server shutdown complete");
    Ok(())
}

/// Builds the in-memory store, seeded from a JSON file when one is configured.
async fn load_memory_store(seed_file: Option<&str>) -> anyhow::Result<MemoryProductStore> {
    let Some(path) = seed_file else {
        warn!("In-memory store has no seed file; every lookup will miss");
        return Ok(MemoryProductStore::new());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read product seed {}", path))?;
    let store = MemoryProductStore::from_json(&json)
        .with_context(|| format!("invalid product seed {}", path))?;
    info!("In-memory store seeded from {}", path);
    Ok(store)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task (if any) and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
