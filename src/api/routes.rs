//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_book_handler, delete_book_handler, fields_handler, get_book_by_slug_handler,
    get_book_handler, health_handler, list_books_handler, list_books_query_handler,
    more_by_author_handler, most_viewed_handler, random_handler, related_handler, search_handler,
    stats_handler, update_book_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/books", get(list_books_query_handler).post(create_book_handler))
        .route("/books/list", post(list_books_handler))
        .route("/books/search", get(search_handler))
        .route("/books/fields", get(fields_handler))
        .route("/books/random", get(random_handler))
        .route("/books/most-viewed", get(most_viewed_handler))
        .route("/books/slug/:slug", get(get_book_by_slug_handler))
        .route(
            "/books/:id",
            get(get_book_handler)
                .patch(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/books/:id/related", get(related_handler))
        .route("/books/:id/more-by-author", get(more_by_author_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::cache::MemoryCache;
    use crate::config::Config;
    use crate::store::MemoryBookStore;

    fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(MemoryBookStore::new()),
            Arc::new(MemoryCache::new(100)),
            &Config::default(),
        );
        create_router(state)
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_test_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let status = status_of(request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_segments_win_over_id() {
        let status = status_of(
            Request::builder()
                .uri("/books/fields")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unpaged_listing_on_empty_catalog() {
        let status = status_of(Request::builder().uri("/books").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_paged_listing_on_empty_catalog_is_not_found() {
        let status = status_of(
            Request::builder()
                .uri("/books?page=1&limit=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_empty_payload() {
        let status = status_of(
            Request::builder()
                .method("POST")
                .uri("/books")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_random_on_empty_catalog() {
        let status = status_of(
            Request::builder()
                .uri("/books/random")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
