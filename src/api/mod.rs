//! API Module
//!
//! HTTP handlers and routing for the product lookup service.
//!
//! # Endpoints
//! - `GET /products/:id` - Retrieve a product by id
//! - `GET /stats` - Lookup statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
