//! Domain records and the DTOs used for HTTP request/response bodies.

pub mod book;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use book::{Book, BookPatch, BookSummary, GroupedFields, MostViewed, NewBook, ViewDetail};
pub use requests::{ListingRequest, MostViewedQuery, Pagination, SearchQuery};
pub use responses::{DeleteResponse, HealthResponse, ListingResponse, PagedListing, StatsResponse};
