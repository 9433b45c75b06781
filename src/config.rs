//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// What a paginated listing returns when the requested page holds no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPagePolicy {
    /// Treat the empty page as a lookup miss
    #[default]
    NotFound,
    /// Return the empty page as a successful response
    Empty,
}

impl FromStr for EmptyPagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" | "notfound" => Ok(Self::NotFound),
            "empty" => Ok(Self::Empty),
            other => Err(format!("unknown empty page policy '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the listing cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds applied to cached listing pages
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Behavior for paginated requests that land on an empty page
    pub empty_page_policy: EmptyPagePolicy,
    /// Number of records returned by the most-viewed query
    pub most_viewed_limit: usize,
    /// Number of records returned by related and more-by-author queries
    pub related_limit: usize,
    /// Optional JSON file of books loaded into the store at startup
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Listing cache TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `EMPTY_PAGE_POLICY` - `not_found` or `empty` (default: `not_found`)
    /// - `MOST_VIEWED_LIMIT` - Size of the most-viewed list (default: 10)
    /// - `RELATED_LIMIT` - Size of related lists (default: 5)
    /// - `SEED_PATH` - JSON array of books to preload (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            empty_page_policy: parse_var("EMPTY_PAGE_POLICY")
                .unwrap_or(defaults.empty_page_policy),
            most_viewed_limit: parse_var("MOST_VIEWED_LIMIT")
                .unwrap_or(defaults.most_viewed_limit),
            related_limit: parse_var("RELATED_LIMIT").unwrap_or(defaults.related_limit),
            seed_path: env::var("SEED_PATH").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: 1000,
            cache_ttl: 300,
            cleanup_interval: 1,
            empty_page_policy: EmptyPagePolicy::NotFound,
            most_viewed_limit: 10,
            related_limit: 5,
            seed_path: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
