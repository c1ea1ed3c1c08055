//! Data model and response DTOs for the product lookup API
//!
//! `Product` is both the cached payload and the response body, so its JSON
//! shape must stay stable across deployments.

pub mod product;
pub mod responses;

// Re-export commonly used types
pub use product::Product;
pub use responses::{HealthResponse, StatsResponse};
