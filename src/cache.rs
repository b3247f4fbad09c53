//! Mtime-validated object cache
//!
//! A pure value cache keyed by (theme path, relative file name). Entries
//! carry the file modification time observed when they were stored; a hit
//! is only served if the live file's mtime still matches, so staleness is
//! detected lazily at read time. There is no per-key invalidation and no
//! expiry; `clear()` wipes everything.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot of a loaded object plus the mtime observed at cache time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub content: String,
    pub mtime: u64,
}

/// Process-wide cache shared by reference across stores.
///
/// Constructed once per process or request scope and passed to each
/// [`ObjectStore`](crate::ObjectStore); the host clears it explicitly on
/// cache-busting events. Safe to share between threads.
#[derive(Debug, Default)]
pub struct MtimeCache {
    entries: Mutex<HashMap<(PathBuf, String), CacheEntry>>,
}

impl MtimeCache {
    pub fn new() -> Self {
        MtimeCache::default()
    }

    pub fn get(&self, theme_path: &Path, file_name: &str) -> Option<CacheEntry> {
        self.entries
            .lock()
            .get(&(theme_path.to_path_buf(), file_name.to_string()))
            .cloned()
    }

    pub fn put(&self, theme_path: &Path, file_name: &str, entry: CacheEntry) {
        debug!("Caching {} @ {:?} (mtime {})", file_name, theme_path, entry.mtime);
        self.entries
            .lock()
            .insert((theme_path.to_path_buf(), file_name.to_string()), entry);
    }

    /// Wipe all entries unconditionally.
    pub fn clear(&self) {
        debug!("Clearing object cache");
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
