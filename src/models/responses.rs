//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::listing::PaginationInfo;
use crate::models::Book;

/// One page of books plus its pagination metadata.
///
/// This is also the payload stored in the listing cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedListing {
    pub info: PaginationInfo,
    pub results: Vec<Book>,
}

/// Response body for listing requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListingResponse {
    /// `{ totalBooks, results }`
    #[serde(rename_all = "camelCase")]
    Unpaged { total_books: u64, results: Vec<Book> },
    /// `{ info, results }`
    Paged(PagedListing),
}

impl ListingResponse {
    pub fn results(&self) -> &[Book] {
        match self {
            ListingResponse::Unpaged { results, .. } => results,
            ListingResponse::Paged(page) => &page.results,
        }
    }
}

/// Response body for DELETE /books/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: Uuid,
}

impl DeleteResponse {
    pub fn new(id: Uuid) -> Self {
        Self {
            message: format!("Book '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
