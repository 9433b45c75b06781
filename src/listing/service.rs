//! Listing orchestration.
//!
//! Unpaged listings always go to the store and never touch the cache. Paged
//! listings are read-through: look up the page's key, and on a miss query
//! the store, build the response and cache it with a TTL in one call.
//! Writes call [`ListingService::invalidate`], which retires every cached page.
//!
//! Concurrent misses on the same key each query the store; the last cache
//! write wins.

use std::num::NonZeroU64;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheError};
use crate::config::EmptyPagePolicy;
use crate::error::{AppError, Result};
use crate::listing::{pagination, ListingKeys};
use crate::models::{ListingRequest, ListingResponse, PagedListing, Pagination};
use crate::store::BookStore;

pub struct ListingService {
    store: Arc<dyn BookStore>,
    cache: Arc<dyn Cache>,
    keys: ListingKeys,
    ttl_secs: u64,
    empty_page: EmptyPagePolicy,
}

impl ListingService {
    pub fn new(
        store: Arc<dyn BookStore>,
        cache: Arc<dyn Cache>,
        ttl_secs: u64,
        empty_page: EmptyPagePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            keys: ListingKeys::new(),
            ttl_secs,
            empty_page,
        }
    }

    /// Answers a listing request.
    ///
    /// # Errors
    /// - `NotFound` when a paged request lands on an empty page and the
    ///   policy is [`EmptyPagePolicy::NotFound`]
    /// - store failures and an unavailable cache, unmodified
    pub async fn list(&self, request: &ListingRequest) -> Result<ListingResponse> {
        match request.pagination() {
            Pagination::Unpaged => self.list_unpaged().await,
            Pagination::Paged { page, limit } => self
                .list_paged(&request.raw_body, page, limit)
                .await
                .map(ListingResponse::Paged),
        }
    }

    /// Retires every cached page. Returns the new collection version.
    pub fn invalidate(&self) -> u64 {
        let version = self.keys.bump();
        info!(version, "Listing cache invalidated");
        version
    }

    pub fn version(&self) -> u64 {
        self.keys.version()
    }

    async fn list_unpaged(&self) -> Result<ListingResponse> {
        let (results, total_books) = self.store.list_all().await?;
        debug!(total_books, "Unpaged listing served from store");
        Ok(ListingResponse::Unpaged {
            total_books,
            results,
        })
    }

    async fn list_paged(
        &self,
        body: &Value,
        page: NonZeroU64,
        limit: NonZeroU64,
    ) -> Result<PagedListing> {
        let key = self.keys.paged(body, page, limit);

        let listing = match self.cached(&key).await? {
            Some(listing) => {
                debug!(%key, "Listing cache hit");
                listing
            }
            None => {
                debug!(%key, "Listing cache miss");
                let (results, total) = self
                    .store
                    .list_page(pagination::offset(page, limit), limit.get())
                    .await?;
                let listing = PagedListing {
                    info: pagination::compute(page, limit, total),
                    results,
                };
                self.populate(&key, &listing).await?;
                listing
            }
        };

        if listing.results.is_empty() && self.empty_page == EmptyPagePolicy::NotFound {
            return Err(AppError::NotFound(format!(
                "no books on page {} with limit {}",
                page, limit
            )));
        }
        Ok(listing)
    }

    /// Caches a freshly built page. Pages the cache refuses to hold are
    /// served uncached.
    async fn populate(&self, key: &str, listing: &PagedListing) -> Result<()> {
        let payload = serde_json::to_string(listing)?;
        match self.cache.set_with_ttl(key, payload, self.ttl_secs).await {
            Ok(()) => Ok(()),
            Err(err @ (CacheError::ValueTooLarge { .. } | CacheError::Full)) => {
                warn!(%key, error = %err, "Serving listing page uncached");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Reads and decodes a cached page. A payload that no longer decodes is
    /// dropped and reported as a miss.
    async fn cached(&self, key: &str) -> Result<Option<PagedListing>> {
        let Some(raw) = self.cache.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(listing) => Ok(Some(listing)),
            Err(err) => {
                warn!(%key, error = %err, "Discarding undecodable cached listing");
                self.cache.delete(key).await?;
                Ok(None)
            }
        }
    }
}
