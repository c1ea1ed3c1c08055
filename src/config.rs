//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which cache adapter the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Shared Redis server (production)
    Redis,
    /// Process-local TTL cache
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Which product store the service reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MySQL `products` table (production)
    MySql,
    /// Seeded in-process map
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache adapter selection
    pub cache_backend: CacheBackend,
    /// Store adapter selection
    pub store_backend: StoreBackend,
    /// JSON array of products loaded into the memory store
    pub products_seed_file: Option<String>,
    /// Redis host:port
    pub redis_addr: String,
    /// Redis password, if the server requires one
    pub redis_password: Option<String>,
    /// Redis logical database index
    pub redis_db: i64,
    /// Maximum pooled Redis connections
    pub redis_pool_size: usize,
    /// MySQL connection string
    pub database_url: String,
    /// Maximum pooled MySQL connections
    pub database_max_connections: u32,
    /// TTL in seconds for repopulated cache entries
    pub cache_ttl: u64,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Capacity of the in-memory cache backend
    pub memory_max_entries: usize,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `STORE_BACKEND` - `mysql` or `memory` (default: mysql)
    /// - `PRODUCTS_SEED_FILE` - JSON seed for the memory store (default: none)
    /// - `REDIS_ADDR` - Redis address (default: localhost:6379)
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    /// - `REDIS_DB` - Redis database index (default: 0)
    /// - `REDIS_POOL_SIZE` - Redis pool size (default: 16)
    /// - `DATABASE_URL` - MySQL URL (default: mysql://root@localhost:3306/task_management)
    /// - `DATABASE_MAX_CONNECTIONS` - MySQL pool size (default: 10)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 3600)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 10)
    /// - `MEMORY_CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            store_backend: parse_var("STORE_BACKEND").unwrap_or(defaults.store_backend),
            products_seed_file: env::var("PRODUCTS_SEED_FILE").ok().filter(|p| !p.is_empty()),
            redis_addr: env::var("REDIS_ADDR").unwrap_or(defaults.redis_addr),
            redis_password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            redis_db: parse_var("REDIS_DB").unwrap_or(defaults.redis_db),
            redis_pool_size: parse_var("REDIS_POOL_SIZE").unwrap_or(defaults.redis_pool_size),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            memory_max_entries: parse_var("MEMORY_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.memory_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Builds the `redis://` connection URL from address, password and DB index.
    pub fn redis_url(&self) -> String {
        match &self.redis_password {
            Some(password) => format!("redis://:{}@{}/{}", password, self.redis_addr, self.redis_db),
            None => format!("redis://{}/{}", self.redis_addr, self.redis_db),
        }
    }

    /// TTL applied to entries written back after a store read.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            cache_backend: CacheBackend::Redis,
            store_backend: StoreBackend::MySql,
            products_seed_file: None,
            redis_addr: "localhost:6379".to_string(),
            redis_password: None,
            redis_db: 0,
            redis_pool_size: 16,
            database_url: "mysql://root@localhost:3306/task_management".to_string(),
            database_max_connections: 10,
            cache_ttl: 3600,
            request_timeout: 10,
            memory_max_entries: 10_000,
            cleanup_interval: 1,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert_eq!(config.store_backend, StoreBackend::MySql);
        assert!(config.products_seed_file.is_none());
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.redis_db, 0);
        assert!(config.redis_password.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_BACKEND");
        env::remove_var("REDIS_ADDR");
        env::remove_var("REDIS_PASSWORD");
        env::remove_var("CACHE_TTL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert_eq!(config.redis_addr, "localhost:6379");
        assert_eq!(config.cache_ttl, 3600);
    }

    #[test]
    fn test_redis_url_without_password() {
        let config = Config::default();
        assert_eq!(config.redis_url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_redis_url_with_password_and_db() {
        let config = Config {
            redis_password: Some("hunter2".to_string()),
            redis_db: 3,
            ..Config::default()
        };
        assert_eq!(config.redis_url(), "redis://:hunter2@localhost:6379/3");
    }

    #[test]
    fn test_cache_backend_parse() {
        assert_eq!("redis".parse::<CacheBackend>(), Ok(CacheBackend::Redis));
        assert_eq!(" Memory ".parse::<CacheBackend>(), Ok(CacheBackend::Memory));
        assert!("memcached".parse::<CacheBackend>().is_err());
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("mysql".parse::<StoreBackend>(), Ok(StoreBackend::MySql));
        assert_eq!("MEMORY".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
