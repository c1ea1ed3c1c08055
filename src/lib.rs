//! Product Cache - read-through product lookup service
//!
//! Serves product records from Redis when present and falls back to MySQL on
//! a miss, writing the record back with a bounded TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ProductLookupService;
pub use tasks::spawn_cleanup_task;
