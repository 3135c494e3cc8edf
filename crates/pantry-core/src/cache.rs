//! # Catalog Cache
//!
//! Client-side copy of a catalog, kept honest by a generation counter.
//!
//! ## Contract: refetch-on-write
//! ```text
//!   write ──► invalidate()          generation += 1, snapshot dropped
//!   read  ──► snapshot()            None while stale → caller refetches
//!   fetch ──► replace(items, gen)   accepted only if gen is still current
//! ```
//!
//! A fetch started before a write carries the old generation, so its result is
//! discarded instead of overwriting the newer state. The store remains the
//! only source of truth; the cache never patches records locally.

/// Last fetched snapshot of one catalog.
///
/// ## Example
/// ```rust
/// use pantry_core::cache::CatalogCache;
///
/// let mut cache = CatalogCache::new();
/// assert_eq!(cache.snapshot(), None);
///
/// // Initial load
/// let generation = cache.generation();
/// assert!(cache.replace(vec!["Apple", "Bread"], generation));
/// assert_eq!(cache.snapshot(), Some(&["Apple", "Bread"][..]));
///
/// // A fetch starts, then a write lands before it returns
/// let in_flight = cache.generation();
/// cache.invalidate();
/// assert_eq!(cache.snapshot(), None);
///
/// // The late result is dropped; the refetch after the write is kept
/// assert!(!cache.replace(vec!["Apple", "Bread"], in_flight));
/// assert!(cache.replace(vec!["Bread"], cache.generation()));
/// assert_eq!(cache.snapshot(), Some(&["Bread"][..]));
/// ```
#[derive(Debug, Clone)]
pub struct CatalogCache<T> {
    items: Option<Vec<T>>,
    generation: u64,
}

impl<T> CatalogCache<T> {
    /// Creates an empty, stale cache.
    pub fn new() -> Self {
        CatalogCache {
            items: None,
            generation: 0,
        }
    }

    /// Generation a fetch must be tagged with to be accepted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self) -> bool {
        self.items.is_none()
    }

    /// The cached snapshot, or `None` if it must be refetched.
    pub fn snapshot(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// Marks the snapshot stale. Call after every write.
    pub fn invalidate(&mut self) {
        self.items = None;
        self.generation += 1;
    }

    /// Stores a fetched snapshot.
    ///
    /// Returns `false` and keeps the cache stale when `generation` is not the
    /// current one.
    pub fn replace(&mut self, items: Vec<T>, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.items = Some(items);
        true
    }
}

impl<T> Default for CatalogCache<T> {
    fn default() -> Self {
        CatalogCache::new()
    }
}
