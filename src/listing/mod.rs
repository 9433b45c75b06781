//! Listing Module
//!
//! Paginated listing of the catalog with a read-through cache.

mod keys;
pub mod pagination;
mod service;

pub use keys::{body_hash, ListingKeys};
pub use pagination::PaginationInfo;
pub use service::ListingService;
