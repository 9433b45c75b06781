//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cache::Cache;
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::listing::ListingService;
use crate::models::{
    Book, BookPatch, DeleteResponse, GroupedFields, HealthResponse, ListingRequest,
    ListingResponse, MostViewed, MostViewedQuery, NewBook, SearchQuery, StatsResponse,
};
use crate::store::BookStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub listing: Arc<ListingService>,
    pub catalog: Arc<CatalogService>,
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    /// Wires the listing and catalog services over the given backends.
    pub fn new(store: Arc<dyn BookStore>, cache: Arc<dyn Cache>, config: &Config) -> Self {
        let listing = Arc::new(ListingService::new(
            store.clone(),
            cache.clone(),
            config.cache_ttl,
            config.empty_page_policy,
        ));
        let catalog = Arc::new(CatalogService::new(
            store,
            listing.clone(),
            config.most_viewed_limit,
            config.related_limit,
        ));
        Self {
            listing,
            catalog,
            cache,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid book id '{}'", raw)))
}

// == Listing ==

/// Handler for POST /books/list
///
/// The JSON body carries optional `page` and `limit`; the whole body shapes
/// the cache key.
pub async fn list_books_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ListingResponse>> {
    let request = ListingRequest::from_body(body);
    Ok(Json(state.listing.list(&request).await?))
}

/// Handler for GET /books
///
/// Same as POST /books/list with the query string standing in for the body.
pub async fn list_books_query_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListingResponse>> {
    let body = Value::Object(
        params
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
    );
    let request = ListingRequest::from_body(body);
    Ok(Json(state.listing.list(&request).await?))
}

// == Writes ==

/// Handler for POST /books
pub async fn create_book_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>)> {
    let book = state.catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Handler for PATCH /books/:id
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.update(id, patch).await?))
}

/// Handler for DELETE /books/:id
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let book = state.catalog.delete(id).await?;
    Ok(Json(DeleteResponse::new(book.id)))
}

// == Single-record reads ==

/// Handler for GET /books/:id
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.get_by_id(id).await?))
}

/// Handler for GET /books/slug/:slug
pub async fn get_book_by_slug_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Book>> {
    Ok(Json(state.catalog.get_by_slug(&slug).await?))
}

/// Handler for GET /books/search?q=
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>> {
    Ok(Json(state.catalog.search(&query.q).await?))
}

/// Handler for GET /books/fields
pub async fn fields_handler(State(state): State<AppState>) -> Result<Json<GroupedFields>> {
    Ok(Json(state.catalog.group_fields().await?))
}

/// Handler for GET /books/random
pub async fn random_handler(State(state): State<AppState>) -> Result<Json<Book>> {
    Ok(Json(state.catalog.random().await?))
}

/// Handler for GET /books/most-viewed?detail=summary|full
pub async fn most_viewed_handler(
    State(state): State<AppState>,
    Query(query): Query<MostViewedQuery>,
) -> Result<Json<MostViewed>> {
    Ok(Json(state.catalog.most_viewed(query.detail.as_deref()).await?))
}

/// Handler for GET /books/:id/related
pub async fn related_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Book>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.related(id).await?))
}

/// Handler for GET /books/:id/more-by-author
pub async fn more_by_author_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Book>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.more_by_author(id).await?))
}

// == Operational ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.stats().await?;
    Ok(Json(stats.into()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
