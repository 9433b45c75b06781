//! In-process `BookStore` backend.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Book, BookPatch, GroupedFields, MostViewed, NewBook, ViewDetail};
use crate::store::{BookStore, StoreError, StoreResult};

/// Books kept in insertion order behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store preloaded with `seed`, rejecting the first invalid entry.
    pub fn with_books(seed: Vec<NewBook>) -> StoreResult<Self> {
        let mut books: Vec<Book> = Vec::with_capacity(seed.len());
        for new in seed {
            let book = validated(new)?;
            ensure_unique_slug(&books, &book.slug, None)?;
            books.push(book);
        }
        Ok(Self {
            books: RwLock::new(books),
        })
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }
}

fn validated(new: NewBook) -> StoreResult<Book> {
    if let Some(msg) = new.validate() {
        return Err(StoreError::InvalidPayload(msg));
    }
    Ok(Book::from_new(new))
}

fn ensure_unique_slug(books: &[Book], slug: &str, except: Option<Uuid>) -> StoreResult<()> {
    if books.iter().any(|b| b.slug == slug && Some(b.id) != except) {
        return Err(StoreError::InvalidPayload(format!(
            "slug '{}' is already taken",
            slug
        )));
    }
    Ok(())
}

fn not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("book {}", id))
}

fn matches_query(book: &Book, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);
    contains(&book.title)
        || contains(&book.author)
        || contains(&book.description)
        || book.genres.iter().any(|g| contains(g))
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> StoreResult<(Vec<Book>, u64)> {
        let books = self.books.read().await;
        Ok((books.clone(), books.len() as u64))
    }

    async fn list_page(&self, offset: u64, limit: u64) -> StoreResult<(Vec<Book>, u64)> {
        let books = self.books.read().await;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let page = books.iter().skip(skip).take(take).cloned().collect();
        Ok((page, books.len() as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.slug == slug).cloned())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Book>> {
        let needle = query.trim().to_lowercase();
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| matches_query(b, &needle))
            .cloned()
            .collect())
    }

    async fn group_fields(&self) -> StoreResult<GroupedFields> {
        let books = self.books.read().await;
        let authors: BTreeSet<&str> = books.iter().map(|b| b.author.as_str()).collect();
        let genres: BTreeSet<&str> = books
            .iter()
            .flat_map(|b| b.genres.iter().map(String::as_str))
            .collect();
        let years: BTreeSet<i32> = books.iter().filter_map(|b| b.year).collect();

        Ok(GroupedFields {
            authors: authors.into_iter().map(str::to_string).collect(),
            genres: genres.into_iter().map(str::to_string).collect(),
            years: years.into_iter().collect(),
        })
    }

    async fn random(&self) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.choose(&mut rand::thread_rng()).cloned())
    }

    async fn related(&self, id: Uuid, limit: usize) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;
        let source = books.iter().find(|b| b.id == id).ok_or_else(|| not_found(id))?;
        let genres: HashSet<&str> = source.genres.iter().map(String::as_str).collect();

        let mut scored: Vec<(usize, &Book)> = books
            .iter()
            .filter(|b| b.id != id)
            .map(|b| {
                let shared = b.genres.iter().filter(|g| genres.contains(g.as_str())).count();
                (shared, b)
            })
            .filter(|(shared, _)| *shared > 0)
            .collect();
        scored.sort_by_key(|(shared, b)| (Reverse(*shared), Reverse(b.views)));

        Ok(scored.into_iter().take(limit).map(|(_, b)| b.clone()).collect())
    }

    async fn more_by_author(&self, id: Uuid, limit: usize) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;
        let source = books.iter().find(|b| b.id == id).ok_or_else(|| not_found(id))?;
        let author = source.author.to_lowercase();

        Ok(books
            .iter()
            .filter(|b| b.id != id && b.author.to_lowercase() == author)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn most_viewed(&self, detail: ViewDetail, limit: usize) -> StoreResult<MostViewed> {
        let books = self.books.read().await;
        let mut ranked: Vec<&Book> = books.iter().collect();
        // Stable sort keeps insertion order among equal view counts
        ranked.sort_by_key(|b| Reverse(b.views));
        let top = ranked.into_iter().take(limit);

        Ok(match detail {
            ViewDetail::Summary => MostViewed::Summary(top.map(Book::summary).collect()),
            ViewDetail::Full => MostViewed::Full(top.cloned().collect()),
        })
    }

    async fn create(&self, payload: NewBook) -> StoreResult<Book> {
        let book = validated(payload)?;
        let mut books = self.books.write().await;
        ensure_unique_slug(&books, &book.slug, None)?;
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book> {
        if let Some(msg) = patch.validate() {
            return Err(StoreError::InvalidPayload(msg));
        }
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;

        let mut updated = books[index].clone();
        updated.apply(patch);
        ensure_unique_slug(&books, &updated.slug, Some(id))?;
        books[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(books.remove(index))
    }

    async fn record_view(&self, id: Uuid) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;
        book.views += 1;
        Ok(book.clone())
    }
}
