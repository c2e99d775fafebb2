use crate::cache::{CacheError, MovieCache};
use crate::{LookupKey, MovieRecord};
use std::time::Duration;

/// A cache that never stores anything.
#[derive(Debug, Default)]
pub struct NoopCache;

impl MovieCache for NoopCache {
    fn get(&self, _key: &LookupKey) -> Option<MovieRecord> {
        None
    }

    fn put(&self, _key: &LookupKey, _record: &MovieRecord, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
