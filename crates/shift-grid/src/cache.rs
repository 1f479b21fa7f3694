//! In-memory LRU cache for loaded datum shift grids.
//!
//! Grid files are expensive to parse and immutable once loaded, so
//! grids are shared process-wide and cached by canonical file path.
//! The whole check-and-load sequence runs under one lock: concurrent
//! requests for the same file serialize instead of parsing twice.

use crate::error::{GridError, Result};
use crate::grid::{ShiftGrid, OFFSET_DIMENSIONS};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Statistics for the grid cache.
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub total_cells_cached: u64,
}

impl CacheStats {
    /// Cache hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Estimated memory held by cached offset arrays, in MB.
    pub fn estimated_memory_mb(&self) -> f64 {
        // Each cell stores three f32 offset components.
        (self.total_cells_cached as f64 * OFFSET_DIMENSIONS as f64 * 4.0) / (1024.0 * 1024.0)
    }
}

/// LRU cache of loaded grids keyed by canonical file path.
pub struct GridCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

struct CacheInner {
    cache: LruCache<PathBuf, Arc<ShiftGrid>>,
    stats: CacheStats,
}

fn lock(mutex: &Mutex<CacheInner>) -> MutexGuard<'_, CacheInner> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl GridCache {
    /// Create a cache holding at most `capacity` grids; a zero capacity
    /// is treated as one.
    pub fn new(capacity: usize) -> GridCache {
        let size = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        GridCache {
            inner: Mutex::new(CacheInner {
                cache: LruCache::new(size),
                stats: CacheStats::default(),
            }),
            capacity,
        }
    }

    /// Return the grid for the given file, loading it on a cache miss.
    ///
    /// The path is canonicalized first so that different spellings of
    /// the same file share one entry.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<ShiftGrid>> {
        let canonical = path.canonicalize().map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut inner = lock(&self.inner);
        if let Some(grid) = inner.cache.get(&canonical) {
            let grid = grid.clone();
            inner.stats.hits += 1;
            tracing::debug!(file = %canonical.display(), "datum shift grid cache hit");
            return Ok(grid);
        }
        inner.stats.misses += 1;
        tracing::debug!(file = %canonical.display(), "datum shift grid cache miss; loading");
        let grid = Arc::new(ShiftGrid::from_file(&canonical)?);
        inner.stats.total_cells_cached += grid.len() as u64;
        inner.cache.put(canonical, grid.clone());
        inner.stats.entries = inner.cache.len();
        Ok(grid)
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut inner = lock(&self.inner);
        inner.stats.entries = inner.cache.len();
        inner.stats.clone()
    }

    /// Drop every cached grid.
    pub fn clear(&self) {
        let mut inner = lock(&self.inner);
        inner.cache.clear();
        inner.stats = CacheStats::default();
    }

    /// Number of grids currently cached.
    pub fn len(&self) -> usize {
        lock(&self.inner).cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of grids this cache retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
