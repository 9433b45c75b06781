//! Catalog Module
//!
//! Single-record reads and the write operations. Every successful write
//! invalidates the listing cache.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::listing::ListingService;
use crate::models::{Book, BookPatch, GroupedFields, MostViewed, NewBook, ViewDetail};
use crate::store::{BookStore, StoreError};

pub struct CatalogService {
    store: Arc<dyn BookStore>,
    listing: Arc<ListingService>,
    most_viewed_limit: usize,
    related_limit: usize,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn BookStore>,
        listing: Arc<ListingService>,
        most_viewed_limit: usize,
        related_limit: usize,
    ) -> Self {
        Self {
            store,
            listing,
            most_viewed_limit,
            related_limit,
        }
    }

    // == Writes ==

    /// Validates and persists a new book.
    pub async fn create(&self, payload: NewBook) -> Result<Book> {
        if let Some(msg) = payload.validate() {
            return Err(AppError::BadRequest(msg));
        }
        let book = self.store.create(payload).await?;
        self.listing.invalidate();
        info!(id = %book.id, slug = %book.slug, "Book created");
        Ok(book)
    }

    /// Applies a partial update. An unknown id is a bad request, not a miss.
    pub async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book> {
        if let Some(msg) = patch.validate() {
            return Err(AppError::BadRequest(msg));
        }
        let book = self.store.update(id, patch).await.map_err(|err| match err {
            StoreError::NotFound(what) => AppError::BadRequest(format!("{} does not exist", what)),
            other => other.into(),
        })?;
        self.listing.invalidate();
        info!(%id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Book> {
        let book = self.store.delete(id).await?;
        self.listing.invalidate();
        info!(%id, "Book deleted");
        Ok(book)
    }

    // == Reads ==

    /// Fetches a book and counts the view.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Book> {
        Ok(self.store.record_view(id).await?)
    }

    /// Fetches a book by slug and counts the view.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Book> {
        let book = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book with slug '{}'", slug)))?;
        Ok(self.store.record_view(book.id).await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(AppError::BadRequest("search query cannot be empty".to_string()));
        }
        Ok(self.store.search(query).await?)
    }

    pub async fn group_fields(&self) -> Result<GroupedFields> {
        Ok(self.store.group_fields().await?)
    }

    pub async fn random(&self) -> Result<Book> {
        self.store
            .random()
            .await?
            .ok_or_else(|| AppError::NotFound("catalog is empty".to_string()))
    }

    pub async fn related(&self, id: Uuid) -> Result<Vec<Book>> {
        Ok(self.store.related(id, self.related_limit).await?)
    }

    pub async fn more_by_author(&self, id: Uuid) -> Result<Vec<Book>> {
        Ok(self.store.more_by_author(id, self.related_limit).await?)
    }

    /// `detail` must be exactly `summary` or `full`.
    pub async fn most_viewed(&self, detail: Option<&str>) -> Result<MostViewed> {
        let detail: ViewDetail = detail
            .ok_or_else(|| AppError::BadRequest("detail is required".to_string()))?
            .parse()
            .map_err(AppError::BadRequest)?;
        Ok(self.store.most_viewed(detail, self.most_viewed_limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::cache::{Cache, MemoryCache};
    use crate::config::EmptyPagePolicy;
    use crate::models::ListingRequest;
    use crate::store::MemoryBookStore;

    struct Fixture {
        catalog: CatalogService,
        listing: Arc<ListingService>,
        cache: MemoryCache,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn BookStore> = Arc::new(
            MemoryBookStore::with_books(vec![
                new_book("Dune", "Frank Herbert"),
                new_book("Emma", "Jane Austen"),
            ])
            .unwrap(),
        );
        let cache = MemoryCache::new(100);
        let listing = Arc::new(ListingService::new(
            store.clone(),
            Arc::new(cache.clone()),
            300,
            EmptyPagePolicy::NotFound,
        ));
        Fixture {
            catalog: CatalogService::new(store, listing.clone(), 10, 5),
            listing,
            cache,
        }
    }

    fn new_book(title: &str, author: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            genres: vec!["fiction".to_string()],
            ..NewBook::default()
        }
    }

    #[tokio::test]
    async fn test_create_invalidates_listing_cache() {
        let fx = fixture();
        let req = ListingRequest::from_body(json!({"page": 1, "limit": 10}));

        fx.listing.list(&req).await.unwrap();
        fx.catalog.create(new_book("Persuasion", "Jane Austen")).await.unwrap();
        let listing = fx.listing.list(&req).await.unwrap();

        assert_eq!(listing.results().len(), 3);
        assert_eq!(fx.listing.version(), 1);
        assert_eq!(fx.cache.stats().await.unwrap().hits, 0);
    }

    #[tokio::test]
    async fn test_create_empty_payload_is_bad_request() {
        let fx = fixture();

        let result = fx.catalog.create(NewBook::default()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(fx.listing.version(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_is_bad_request() {
        let fx = fixture();
        let result = fx.catalog.create(new_book("Dune", "Someone")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_bad_request() {
        let fx = fixture();
        let patch = BookPatch {
            year: Some(2000),
            ..BookPatch::default()
        };

        let result = fx.catalog.update(Uuid::new_v4(), patch).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(fx.listing.version(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_invalidate() {
        let fx = fixture();
        let dune = fx.catalog.get_by_slug("dune").await.unwrap();

        let updated = fx
            .catalog
            .update(
                dune.id,
                BookPatch {
                    year: Some(1965),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.year, Some(1965));
        assert_eq!(fx.listing.version(), 1);

        fx.catalog.delete(dune.id).await.unwrap();
        assert_eq!(fx.listing.version(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let fx = fixture();
        let result = fx.catalog.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(fx.listing.version(), 0);
    }

    #[tokio::test]
    async fn test_reads_count_views() {
        let fx = fixture();

        let first = fx.catalog.get_by_slug("emma").await.unwrap();
        let second = fx.catalog.get_by_id(first.id).await.unwrap();

        assert_eq!(first.views, 1);
        assert_eq!(second.views, 2);
        assert!(matches!(
            fx.catalog.get_by_slug("missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            fx.catalog.get_by_id(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_most_viewed_detail_validation() {
        let fx = fixture();

        assert!(matches!(
            fx.catalog.most_viewed(Some("other")).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            fx.catalog.most_viewed(None).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            fx.catalog.most_viewed(Some("summary")).await,
            Ok(MostViewed::Summary(_))
        ));
        assert!(matches!(
            fx.catalog.most_viewed(Some("full")).await,
            Ok(MostViewed::Full(_))
        ));
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let fx = fixture();

        assert!(matches!(fx.catalog.search("  ").await, Err(AppError::BadRequest(_))));
        assert_eq!(fx.catalog.search("austen").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_random_on_empty_catalog() {
        let store: Arc<dyn BookStore> = Arc::new(MemoryBookStore::new());
        let listing = Arc::new(ListingService::new(
            store.clone(),
            Arc::new(MemoryCache::new(10)),
            300,
            EmptyPagePolicy::NotFound,
        ));
        let catalog = CatalogService::new(store, listing, 10, 5);

        assert!(matches!(catalog.random().await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_related_and_more_by_author() {
        let fx = fixture();
        let dune = fx.catalog.get_by_slug("dune").await.unwrap();

        assert_eq!(fx.catalog.related(dune.id).await.unwrap().len(), 1);
        assert!(fx.catalog.more_by_author(dune.id).await.unwrap().is_empty());
        assert!(matches!(
            fx.catalog.related(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
