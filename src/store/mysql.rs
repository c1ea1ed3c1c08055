//! MySQL product store backed by an sqlx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::Product;
use crate::store::ProductStore;

/// How long a query waits for a pooled connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// MySQL-backed product store.
///
/// Expects a `products` table with `id BIGINT`, `name`, `description` text
/// columns and `price DOUBLE`.
#[derive(Debug, Clone)]
pub struct MySqlProductStore {
    pool: MySqlPool,
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

impl MySqlProductStore {
    /// Wraps an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a lazily connecting pool; the URL is validated now, the
    /// server is first contacted by the first query.
    pub fn connect_lazy(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(url)
            .map_err(|e| StoreError::Connection(format!("Invalid database config: {}", e)))?;

        info!("MySQL pool configured (max_connections={})", max_connections);
        Ok(Self::new(pool))
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        info!("Closing MySQL connection pool...");
        self.pool.close().await;
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        e @ (sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed) => StoreError::Connection(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl ProductStore for MySqlProductStore {
    async fn find_by_id(&self, id: i64) -> Result<Product, StoreError> {
        debug!("Querying product {} from MySQL", id);

        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Product::from).ok_or(StoreError::NotFound(id))
    }
}
