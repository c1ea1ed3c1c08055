//! API Handlers
//!
//! HTTP request handlers. The product handler only extracts the id and
//! delegates to the lookup service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::models::{HealthResponse, Product, StatsResponse};
use crate::service::ProductLookupService;

/// Application state shared across all handlers.
///
/// The lookup service owns long-lived, concurrency-safe cache and store
/// handles, so cloning the state is just an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<ProductLookupService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(lookup: ProductLookupService) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}

/// Handler for GET /products/:id
///
/// Returns the product as JSON, 404 if it cannot be resolved, 500 on cache faults.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = state.lookup.get_product(id).await?;
    Ok(Json(product))
}

/// Handler for GET /stats
///
/// Returns lookup counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.lookup.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
