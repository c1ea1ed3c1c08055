//! TTL Cleanup Task
//!
//! Background task that periodically purges expired entries from the
//! in-memory cache backend. Redis expires keys on its own and needs no sweep.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Shortest interval between sweeps; each sweep takes the cache lock.
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns a background task that purges expired entries every `interval`,
/// raised to [`MIN_CLEANUP_INTERVAL`] if shorter.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new(10_000);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: MemoryCache, interval: Duration) -> JoinHandle<()> {
    let interval = sweep_interval(interval);
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

fn sweep_interval(requested: Duration) -> Duration {
    requested.max(MIN_CLEANUP_INTERVAL)
}
