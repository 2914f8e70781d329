use crate::core::geo::TileCoord;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// In-memory cache of loaded tile resources using LRU eviction.
///
/// Keys are wrapped server coordinates, so the same image serves every screen
/// cell that shows the tile. Clones share the underlying storage; the host
/// creates one cache and hands it to whatever needs it.
pub struct TileCache<T> {
    cache: Arc<Mutex<LruCache<TileCoord, Arc<T>>>>,
}

impl<T> TileCache<T> {
    /// Create a new tile cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Create a new tile cache with default capacity (1024 tiles)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }

    /// Get a tile from the cache, marking it as recently used
    pub fn get(&self, coord: &TileCoord) -> Option<Arc<T>> {
        self.cache.lock().ok()?.get(coord).cloned()
    }

    /// Insert a tile into the cache
    pub fn insert(&self, coord: TileCoord, resource: T) {
        self.put(coord, Arc::new(resource));
    }

    /// Insert a tile into the cache (using Arc directly)
    pub fn put(&self, coord: TileCoord, resource: Arc<T>) {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some((evicted, _)) = cache.push(coord, resource) {
                if evicted != coord {
                    log::trace!("evicted tile {}", evicted);
                }
            }
        }
    }

    /// Check if a tile is in the cache without touching its recency
    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.contains(coord))
            .unwrap_or(false)
    }

    /// Remove a tile from the cache
    pub fn remove(&self, coord: &TileCoord) -> Option<Arc<T>> {
        self.cache.lock().ok()?.pop(coord)
    }

    /// Clear all tiles from the cache
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Get the current number of cached tiles
    pub fn len(&self) -> usize {
        self.cache.lock().ok().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }
}

impl<T> Clone for TileCache<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T> Default for TileCache<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<T> fmt::Debug for TileCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
