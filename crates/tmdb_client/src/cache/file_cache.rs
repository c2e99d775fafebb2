//! File-based cache implementation
//!
//! Each entry lives in its own JSON file named after the SHA-256 of its [LookupKey]; the full key
//! is stored inside the entry and checked on read. Entries are written to a temporary file in the
//! cache directory and renamed over the target, so concurrent reelbot processes only ever read
//! complete entries.

use crate::cache::{CacheEntry, CacheError, MovieCache};
use crate::{LookupKey, MovieRecord};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A cache that persists records to disk across invocations.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (creating if necessary) a cache in `dir`.
    pub fn new(dir: &Path) -> Result<Self, CacheError> {
        fs::create_dir_all(dir)?;
        Ok(FileCache {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &LookupKey) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_str().as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }
}

impl MovieCache for FileCache {
    fn get(&self, key: &LookupKey) -> Option<MovieRecord> {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache entry.");
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unparsable cache entry.");
                return None;
            }
        };
        if !entry.is_valid_for(key) {
            debug!(key = %key, "Cache entry is expired or belongs to another key.");
            return None;
        }

        Some(entry.record)
    }

    fn put(&self, key: &LookupKey, record: &MovieRecord, ttl: Duration) -> Result<(), CacheError> {
        let entry = CacheEntry::new(key, record, ttl);
        let temp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, &entry)?;
            writer.flush()?;
        }
        temp.persist(self.path_for(key))?;
        debug!(key = %key, "Stored cache entry.");

        Ok(())
    }
}
