//! Response DTOs for the auxiliary endpoints
//!
//! Product lookups answer with `Product` directly; these cover /stats and /health.

use serde::Serialize;

use crate::service::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub cache_hits: u64,
    /// Lookups that found no cache entry
    pub cache_misses: u64,
    /// Cache transport failures and corrupt entries
    pub cache_faults: u64,
    /// Store reads that ended in not-found
    pub store_misses: u64,
    /// Cache repopulations that failed after a successful store read
    pub write_back_failures: u64,
    /// cache_hits / (cache_hits + cache_misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a counter snapshot
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self {
            cache_hits: snapshot.cache_hits,
            cache_misses: snapshot.cache_misses,
            cache_faults: snapshot.cache_faults,
            store_misses: snapshot.store_misses,
            write_back_failures: snapshot.write_back_failures,
            hit_rate: snapshot.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
