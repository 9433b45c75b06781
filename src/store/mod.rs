//! Store Module
//!
//! `BookStore` is the document-collection seam: every query the catalog and
//! the listing service issue goes through it. `MemoryBookStore` is the
//! in-process backend.

mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Book, BookPatch, GroupedFields, MostViewed, NewBook, ViewDetail};

pub use memory::MemoryBookStore;

// == Store Error ==
/// Failures raised by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Book Store Trait ==
/// Queries and mutations against the book collection.
///
/// Listing methods return the matching records together with the total size
/// of the collection.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_all(&self) -> StoreResult<(Vec<Book>, u64)>;

    /// Records `offset..offset + limit` in insertion order.
    async fn list_page(&self, offset: u64, limit: u64) -> StoreResult<(Vec<Book>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>>;

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Book>>;

    /// Case-insensitive match on title, author, genres and description.
    async fn search(&self, query: &str) -> StoreResult<Vec<Book>>;

    async fn group_fields(&self) -> StoreResult<GroupedFields>;

    async fn random(&self) -> StoreResult<Option<Book>>;

    /// Books sharing a genre with `id`, best matches first.
    async fn related(&self, id: Uuid, limit: usize) -> StoreResult<Vec<Book>>;

    /// Other books by the author of `id`.
    async fn more_by_author(&self, id: Uuid, limit: usize) -> StoreResult<Vec<Book>>;

    async fn most_viewed(&self, detail: ViewDetail, limit: usize) -> StoreResult<MostViewed>;

    async fn create(&self, payload: NewBook) -> StoreResult<Book>;

    async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book>;

    /// Removes and returns the record.
    async fn delete(&self, id: Uuid) -> StoreResult<Book>;

    /// Increments the view counter and returns the updated record.
    async fn record_view(&self, id: Uuid) -> StoreResult<Book>;
}
