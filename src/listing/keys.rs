//! Listing cache keys.
//!
//! A key encodes everything that shapes a paged result: the collection
//! version, a hash of the request body, the page and the limit. Bumping the
//! version on writes makes every previously cached page unreachable; those
//! entries then age out through TTL or LRU eviction.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

const KEY_PREFIX: &str = "books:list";

/// Derives listing keys and owns the collection version they embed.
#[derive(Debug, Default)]
pub struct ListingKeys {
    version: AtomicU64,
}

impl ListingKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Invalidates every key derived so far, returning the new version.
    pub fn bump(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Key for one page of the listing described by `body`.
    pub fn paged(&self, body: &Value, page: NonZeroU64, limit: NonZeroU64) -> String {
        format!(
            "{}:v{}:{:016x}:p{}:l{}",
            KEY_PREFIX,
            self.version(),
            body_hash(body),
            page,
            limit
        )
    }
}

/// Hash of the body with `page` and `limit` removed, since those are encoded
/// in the key separately and may arrive as numbers or strings.
///
/// `serde_json` objects serialize with sorted keys, so field order in the
/// request does not change the hash.
pub fn body_hash(body: &Value) -> u64 {
    let canonical = match body {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove("page");
            map.remove("limit");
            Value::Object(map).to_string()
        }
        Value::Null => String::new(),
        other => other.to_string(),
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn nz(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn test_key_shape() {
        let keys = ListingKeys::new();
        let key = keys.paged(&json!({"page": 2, "limit": 10}), nz(2), nz(10));

        assert!(key.starts_with("books:list:v0:"));
        assert!(key.ends_with(":p2:l10"));
    }

    #[test]
    fn test_different_pages_do_not_collide() {
        let keys = ListingKeys::new();
        let first = keys.paged(&json!({"page": 1, "limit": 10}), nz(1), nz(10));
        let second = keys.paged(&json!({"page": 2, "limit": 10}), nz(2), nz(10));
        let wider = keys.paged(&json!({"page": 1, "limit": 20}), nz(1), nz(20));

        assert_ne!(first, second);
        assert_ne!(first, wider);
    }

    #[test]
    fn test_body_hash_ignores_pagination_and_field_order() {
        let a: Value =
            serde_json::from_str(r#"{"genre":"sf","sort":"title","page":1}"#).unwrap();
        let b: Value =
            serde_json::from_str(r#"{"limit":"5","sort":"title","genre":"sf"}"#).unwrap();

        assert_eq!(body_hash(&a), body_hash(&b));
        assert_ne!(body_hash(&a), body_hash(&json!({"genre": "romance"})));
    }

    #[test]
    fn test_bump_changes_keys() {
        let keys = ListingKeys::new();
        let body = json!({});
        let before = keys.paged(&body, nz(1), nz(10));

        assert_eq!(keys.bump(), 1);
        let after = keys.paged(&body, nz(1), nz(10));

        assert_ne!(before, after);
        assert!(after.starts_with("books:list:v1:"));
    }

    proptest! {
        // Distinct (page, limit) pairs over the same body never share a key.
        #[test]
        fn prop_keys_are_injective_in_page_and_limit(
            p1 in 1u64..500, l1 in 1u64..500, p2 in 1u64..500, l2 in 1u64..500,
            genre in "[a-z]{0,8}"
        ) {
            let keys = ListingKeys::new();
            let body = json!({ "genre": genre });
            let k1 = keys.paged(&body, nz(p1), nz(l1));
            let k2 = keys.paged(&body, nz(p2), nz(l2));

            prop_assert_eq!(k1 == k2, (p1, l1) == (p2, l2));
        }
    }
}
