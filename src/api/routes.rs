//! API Routes
//!
//! Configures the Axum router with the lookup endpoint and service endpoints.

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Router,
};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{get_product_handler, health_handler, stats_handler, AppState};
use crate::error::LookupError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products/:id` - Product lookup (read-through cache)
/// - `GET /stats` - Lookup counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Timeout: drops the in-flight lookup after `request_timeout` (500)
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products/:id", get(get_product_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// An abandoned lookup is a server-side failure, reported like any other.
async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("Request timed out, lookup abandoned");
    } else {
        warn!("Middleware error: {}", err);
    }
    LookupError::Internal(err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::models::Product;
    use crate::service::fakes::{widget, CountingStore};
    use crate::service::ProductLookupService;
    use crate::store::MemoryProductStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = MemoryProductStore::with_products([Product {
            id: 1,
            name: "Bolt".to_string(),
            description: "M6 bolt".to_string(),
            price: 0.1,
        }]);
        let lookup = ProductLookupService::new(Arc::new(MemoryCache::new(100)), Arc::new(store));
        create_router(AppState::new(lookup), Duration::from_secs(5))
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_endpoint() {
        assert_eq!(status_of("/products/1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_not_found() {
        assert_eq!(status_of("/products/2").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_rejected() {
        assert_eq!(status_of("/products/abc").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/products/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_lookup_is_internal_error() {
        let cache = MemoryCache::new(100);
        let store = CountingStore::with_products([widget()]).with_delay(Duration::from_secs(30));
        let lookup = ProductLookupService::new(Arc::new(cache.clone()), Arc::new(store));
        let app = create_router(AppState::new(lookup), Duration::from_secs(1));

        let response = app
            .oneshot(Request::builder().uri("/products/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
        assert!(cache.is_empty().await, "Abandoned lookup must not write back");
    }
}
