//! In-process `Cache` backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{Cache, CacheError, CacheStats, CacheStore};

/// `CacheStore` shared behind an async lock.
///
/// Cloning is cheap and every clone sees the same entries, which is how the
/// cleanup task and the request handlers share one cache.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Drops expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: lookups update LRU order and stats
        Ok(self.inner.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.inner.write().await.set(key.to_string(), value, None)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, CacheError> {
        Ok(self.inner.write().await.expire(key, ttl_secs))
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.inner.write().await.delete(key))
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        self.inner
            .write()
            .await
            .set(key.to_string(), value, Some(ttl_secs))
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.inner.read().await.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new(10);

        cache.set("k", "v".to_string()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        assert!(cache.delete("k").await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_clones_share_entries() {
        let cache = MemoryCache::new(10);
        let other = cache.clone();

        cache.set_with_ttl("k", "v".to_string(), 300).await.unwrap();

        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_expire_zero() {
        let cache = MemoryCache::new(10);

        cache.set("k", "v".to_string()).await.unwrap();
        assert!(cache.expire("k", 0).await.unwrap());
        assert!(!cache.expire("k", 0).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_stats() {
        let cache = MemoryCache::new(10);

        cache.set("k", "v".to_string()).await.unwrap();
        cache.get("k").await.unwrap();
        cache.get("missing").await.unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
