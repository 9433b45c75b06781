//! Cache Store Module
//!
//! Synchronous cache engine combining HashMap storage with LRU bounding and
//! TTL expiration. `MemoryCache` puts it behind the async `Cache` trait.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheError, CacheStats, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Cache Store ==
/// Bounded key-value storage with per-key expiration.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry and its deadline.
    ///
    /// `ttl` of `None` stores without expiration. Writes and expiry happen
    /// under one call, so `set(key, value, Some(ttl))` is atomic with respect
    /// to other callers holding the store lock.
    pub fn set(&mut self, key: String, value: String, ttl: Option<u64>) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key must be 1..={} bytes, got {}",
                MAX_KEY_LENGTH,
                key.len()
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge {
                size: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            // Prefer reclaiming dead entries over evicting live ones
            self.cleanup_expired();
            if self.entries.len() >= self.max_entries {
                let evicted = self.lru.evict_oldest().ok_or(CacheError::Full)?;
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`, dropping it if it has expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Expire ==
    /// Sets a key's deadline to `ttl` seconds from now; zero removes it.
    ///
    /// Returns false when no live entry exists for the key.
    pub fn expire(&mut self, key: &str, ttl: u64) -> bool {
        let live = self.entries.get(key).is_some_and(|entry| !entry.is_expired());
        if !live {
            return false;
        }

        if ttl == 0 {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        } else if let Some(entry) = self.entries.get_mut(key) {
            entry.expire_in(ttl);
        }
        true
    }

    // == Delete ==
    /// Removes an entry, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}
