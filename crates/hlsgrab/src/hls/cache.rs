use std::num::NonZeroUsize;

use lru::LruCache;

/// Number of segment URIs remembered by the playlist monitor.
pub const SEEN_SEGMENTS_CAPACITY: usize = 1024;

/// Bounded set of segment URIs that have already been queued for download.
///
/// Keys are fully resolved, unescaped absolute URIs. Inserting past capacity
/// evicts the least recently used entry. Live playlists slide forward, so an
/// evicted URI is rarely offered again.
pub struct SegmentCache {
    inner: LruCache<String, ()>,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::with_capacity(SEEN_SEGMENTS_CAPACITY)
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: LruCache::new(capacity),
        }
    }

    /// Checks for `uri`, marking it as recently used on a hit.
    pub fn contains(&mut self, uri: &str) -> bool {
        self.inner.get(uri).is_some()
    }

    pub fn insert(&mut self, uri: impl Into<String>) {
        self.inner.put(uri.into(), ());
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }
}

impl Default for SegmentCache {
    fn default() -> Self {
        Self::new()
    }
}
