use crate::cache::{CacheEntry, CacheError, MovieCache};
use crate::{LookupKey, MovieRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A cache that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<LookupKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovieCache for MemoryCache {
    fn get(&self, key: &LookupKey) -> Option<MovieRecord> {
        let mut entries = self.entries.lock().ok()?;
        let record = entries
            .get(key)
            .filter(|entry| entry.is_valid_for(key))
            .map(|entry| entry.record.clone());
        if record.is_none() {
            entries.remove(key);
        }
        record
    }

    fn put(&self, key: &LookupKey, record: &MovieRecord, ttl: Duration) -> Result<(), CacheError> {
        // A poisoned lock only means another thread panicked mid-insert; the map is still usable.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.clone(), CacheEntry::new(key, record, ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::{MemoryCache, MovieCache};
    use crate::{LookupKey, LookupRequest, MovieRecord};
    use std::time::Duration;

    fn key() -> LookupKey {
        LookupKey::for_request(
            &LookupRequest {
                title: String::from("Dune"),
                year: 2021,
                external_id: None,
            },
            "en-US",
        )
    }

    fn record() -> MovieRecord {
        MovieRecord {
            tmdb_id: 438631,
            imdb_id: None,
            title: String::from("Dune"),
            original_title: None,
            overview: None,
            release_date: None,
            runtime: None,
            genres: vec![],
            directors: vec![],
            cast: vec![],
            poster_path: None,
            backdrop_path: None,
            language: String::from("en-US"),
        }
    }

    #[test]
    pub fn get_returns_record_given_entry_within_ttl() {
        // Arrange
        let cache = MemoryCache::new();
        cache.put(&key(), &record(), Duration::from_secs(60)).unwrap();

        // Act
        let actual = cache.get(&key());

        // Assert
        assert_eq!(Some(record()), actual);
    }

    #[test]
    pub fn get_returns_none_given_expired_entry() {
        // Arrange
        let cache = MemoryCache::new();
        cache.put(&key(), &record(), Duration::ZERO).unwrap();

        // Act
        let actual = cache.get(&key());

        // Assert
        assert_eq!(None, actual);
    }

    #[test]
    pub fn put_succeeds_given_ttl_beyond_date_range() {
        // Arrange
        let cache = MemoryCache::new();

        // Act
        let actual = cache.put(
            &key(),
            &record(),
            Duration::from_secs(10_000_000_000 * 60 * 60),
        );

        // Assert
        assert!(actual.is_ok());
        assert_eq!(Some(record()), cache.get(&key()));
    }
}
