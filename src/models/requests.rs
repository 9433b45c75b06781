//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::num::NonZeroU64;

use serde::Deserialize;
use serde_json::Value;

// == Pagination ==
/// Pagination intent, resolved once at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Return the whole collection
    Unpaged,
    /// Return one page of `limit` records
    Paged { page: NonZeroU64, limit: NonZeroU64 },
}

// == Listing Request ==
/// A listing request as received: optional pagination plus the raw body the
/// cache key is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub raw_body: Value,
}

impl ListingRequest {
    /// Reads `page` and `limit` out of a JSON body.
    ///
    /// Both numbers and numeric strings are accepted, since query strings
    /// arrive as string maps.
    pub fn from_body(raw_body: Value) -> Self {
        Self {
            page: integer_field(&raw_body, "page"),
            limit: integer_field(&raw_body, "limit"),
            raw_body,
        }
    }

    /// Missing or non-positive `page` or `limit` means unpaged.
    pub fn pagination(&self) -> Pagination {
        let positive = |v: Option<i64>| {
            v.and_then(|n| u64::try_from(n).ok())
                .and_then(NonZeroU64::new)
        };
        match (positive(self.page), positive(self.limit)) {
            (Some(page), Some(limit)) => Pagination::Paged { page, limit },
            _ => Pagination::Unpaged,
        }
    }
}

fn integer_field(body: &Value, name: &str) -> Option<i64> {
    match body.get(name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// == Query Strings ==
/// Query for GET /books/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Query for GET /books/most-viewed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MostViewedQuery {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paged(page: u64, limit: u64) -> Pagination {
        Pagination::Paged {
            page: NonZeroU64::new(page).unwrap(),
            limit: NonZeroU64::new(limit).unwrap(),
        }
    }

    #[test]
    fn test_listing_request_paged() {
        let req = ListingRequest::from_body(json!({"page": 2, "limit": 10, "genre": "sf"}));
        assert_eq!(req.pagination(), paged(2, 10));
    }

    #[test]
    fn test_listing_request_string_numbers() {
        let req = ListingRequest::from_body(json!({"page": "3", "limit": " 5 "}));
        assert_eq!(req.pagination(), paged(3, 5));
    }

    #[test]
    fn test_listing_request_missing_field_is_unpaged() {
        assert_eq!(
            ListingRequest::from_body(json!({"page": 1})).pagination(),
            Pagination::Unpaged
        );
        assert_eq!(
            ListingRequest::from_body(json!({"limit": 1})).pagination(),
            Pagination::Unpaged
        );
        assert_eq!(
            ListingRequest::from_body(Value::Null).pagination(),
            Pagination::Unpaged
        );
    }

    #[test]
    fn test_listing_request_non_positive_is_unpaged() {
        for body in [
            json!({"page": 0, "limit": 10}),
            json!({"page": 1, "limit": 0}),
            json!({"page": -1, "limit": 10}),
            json!({"page": 1.5, "limit": 10}),
            json!({"page": "abc", "limit": 10}),
        ] {
            assert_eq!(ListingRequest::from_body(body).pagination(), Pagination::Unpaged);
        }
    }

    #[test]
    fn test_search_query_default() {
        let q: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(q.q.is_empty());
    }
}
