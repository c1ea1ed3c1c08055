//! In-memory product store, seeded up front. Used for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::Product;
use crate::store::ProductStore;

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<HashMap<i64, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `products`, keyed by their ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Creates a store from a JSON array of products. Later duplicates of an
    /// id replace earlier ones.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::with_products(products))
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_by_id(&self, id: i64) -> Result<Product, StoreError> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}
