//! Error types for the product lookup service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Cache Fault ==
/// Any cache failure other than an absent key.
#[derive(Error, Debug)]
pub enum CacheFault {
    /// No connection could be obtained from the cache client
    #[error("cache connection unavailable: {0}")]
    Connection(String),

    /// The cache accepted the connection but the command failed
    #[error("cache command failed: {0}")]
    Command(String),
}

// == Store Error ==
/// Failures reported by the durable product store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists for the identifier
    #[error("no product with id {0}")]
    NotFound(i64),

    /// The store could not be reached
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The query ran but failed or returned an unreadable row
    #[error("store query failed: {0}")]
    Query(String),
}

// == Lookup Error ==
/// Outcome of a failed product lookup, as seen by callers.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The product does not resolve to a record, or the store was unreachable
    #[error("product {0} not found")]
    NotFound(i64),

    /// Corrupt cache payload, (de)serialization failure or cache transport fault
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CacheFault> for LookupError {
    fn from(fault: CacheFault) -> Self {
        LookupError::Internal(fault.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        // Plain text bodies only; internal details stay in the logs.
        match self {
            LookupError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "Product not found").into_response()
            }
            LookupError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for product lookups.
pub type Result<T> = std::result::Result<T, LookupError>;
