//! Cache Module
//!
//! The `Cache` trait is the key-value seam the listing service talks to. The
//! in-process backend (`MemoryCache`) wraps a TTL-expiring, LRU-bounded
//! `CacheStore`.

mod entry;
mod lru;
mod memory;
mod stats;
mod store;


use async_trait::async_trait;
use thiserror::Error;

pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 4 * 1024 * 1024; // 4 MB

// == Cache Error ==
/// Failures raised by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    #[error("cache value of {size} bytes exceeds limit of {max}")]
    ValueTooLarge { size: usize, max: usize },

    #[error("cache is full and eviction failed")]
    Full,

    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

// == Cache Trait ==
/// Key-value store with per-key expiration.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` without expiration.
    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Expires `key` after `ttl_secs`; zero expires it immediately.
    /// Returns whether a live key was found.
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, CacheError>;

    /// Removes `key`, returning whether it was present.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Stores `value` with a TTL.
    ///
    /// The default falls back to `set` then `expire`, which is not atomic;
    /// backends with a native primitive should override it.
    async fn set_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        self.set(key, value).await?;
        self.expire(key, ttl_secs).await?;
        Ok(())
    }

    /// Current counters for the backend.
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}
