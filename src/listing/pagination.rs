//! Offset/limit pagination math.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Pagination metadata for one listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total_items: u64,
    pub items_per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub offset: u64,
}

/// Index of the first record on `page`. Pages are 1-based.
pub fn offset(page: NonZeroU64, limit: NonZeroU64) -> u64 {
    (page.get() - 1).saturating_mul(limit.get())
}

/// Computes offset and page count for `page` of size `limit` over
/// `total_items` records.
pub fn compute(page: NonZeroU64, limit: NonZeroU64, total_items: u64) -> PaginationInfo {
    PaginationInfo {
        total_items,
        items_per_page: limit.get(),
        current_page: page.get(),
        total_pages: total_items.div_ceil(limit.get()),
        offset: offset(page, limit),
    }
}
