//! Caches for resolved [MovieRecord]s, keyed by [LookupKey].

mod file_cache;
mod memory_cache;
mod noop_cache;

use crate::{LookupKey, MovieRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

// Longer TTLs are clamped so the expiry stays well inside chrono's date range.
const MAX_TTL_DAYS: i64 = 36_500;

pub use file_cache::FileCache;
pub use memory_cache::MemoryCache;
pub use noop_cache::NoopCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache entry could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cache entry could not be moved into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A store of previously resolved records.
///
/// Implementations must be safe to share between concurrently running reelbot processes: a
/// reader may see an older entry, but never a torn one.
pub trait MovieCache: Send + Sync {
    /// Returns the record stored under `key` unless it is missing or expired.
    fn get(&self, key: &LookupKey) -> Option<MovieRecord>;

    /// Stores `record` under `key` for `ttl`.
    fn put(&self, key: &LookupKey, record: &MovieRecord, ttl: Duration) -> Result<(), CacheError>;
}

/// A cached record along with the key it was stored under and when it stops being valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub expires_at: DateTime<Utc>,
    pub record: MovieRecord,
}

impl CacheEntry {
    pub fn new(key: &LookupKey, record: &MovieRecord, ttl: Duration) -> Self {
        let max_ttl = chrono::Duration::days(MAX_TTL_DAYS);
        let ttl = chrono::Duration::from_std(ttl).map_or(max_ttl, |t| t.min(max_ttl));
        CacheEntry {
            key: String::from(key.as_str()),
            expires_at: Utc::now() + ttl,
            record: record.clone(),
        }
    }

    pub fn is_valid_for(&self, key: &LookupKey) -> bool {
        self.key == key.as_str() && self.expires_at > Utc::now()
    }
}

/// Pick the cache for this invocation: the on-disk cache when a directory is configured and
/// usable, otherwise an in-memory one.
pub fn build_cache(dir: Option<&Path>) -> Box<dyn MovieCache> {
    match dir {
        Some(d) => match FileCache::new(d) {
            Ok(cache) => {
                info!(cache_dir = %d.display(), "Using the on-disk cache.");
                Box::new(cache)
            }
            Err(e) => {
                warn!(cache_dir = %d.display(), error = %e, "Cache directory is unusable; falling back to an in-memory cache.");
                Box::new(MemoryCache::new())
            }
        },
        None => Box::new(MemoryCache::new()),
    }
}
