//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::Utc;

// == Cache Entry ==
/// A serialized payload plus its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload (serialized JSON for listing pages)
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry, expiring after `ttl_seconds` if given.
    pub fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| deadline_from(now, ttl)),
        }
    }

    // == Expire ==
    /// Resets the entry's deadline to `ttl_seconds` from now.
    pub fn expire_in(&mut self, ttl_seconds: u64) {
        self.expires_at = Some(deadline_from(current_timestamp_ms(), ttl_seconds));
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline, so a
    /// zero TTL expires immediately.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires| current_timestamp_ms() >= expires)
    }
}

fn deadline_from(now: u64, ttl_seconds: u64) -> u64 {
    now.saturating_add(ttl_seconds.saturating_mul(1000))
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("{}".to_string(), None);

        assert_eq!(entry.value, "{}");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("{}".to_string(), Some(300));

        let remaining_ms = entry.expires_at.unwrap() - current_timestamp_ms();
        assert!(!entry.is_expired());
        assert!((299_000..=300_000).contains(&remaining_ms));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("{}".to_string(), Some(1));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new("{}".to_string(), Some(0));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expire_in_adds_deadline() {
        let mut entry = CacheEntry::new("{}".to_string(), None);
        entry.expire_in(60);

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }
}
