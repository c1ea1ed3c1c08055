//! Store Module
//!
//! The authoritative side of the lookup: a read-only product source keyed by id.

mod memory;
mod mysql;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::Product;

pub use memory::MemoryProductStore;
pub use mysql::MySqlProductStore;

/// Durable, authoritative product lookup.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches the record for `id`; a missing row is `StoreError::NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Product, StoreError>;
}
