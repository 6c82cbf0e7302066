//! LRU page cache for rasterised pages

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::types::PageImage;

/// Default number of rasterised pages kept in memory
pub const DEFAULT_CACHE_SIZE: usize = 8;

/// Cache key for rasterised pages
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Page number
    pub page: usize,
    /// Scale factor (stored as millionths for stable hashing)
    pub scale_millionths: u32,
}

impl CacheKey {
    #[must_use]
    pub fn new(page: usize, scale: f32) -> Self {
        Self {
            page,
            scale_millionths: (scale * 1_000_000.0) as u32,
        }
    }
}

/// LRU cache for rasterised pages
pub struct PageCache {
    cache: LruCache<CacheKey, Arc<PageImage>>,
}

impl PageCache {
    /// Create a new cache with the given capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Get a cached page, promoting it in the LRU order
    #[must_use]
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<PageImage>> {
        self.cache.get(key).cloned()
    }

    /// Check if a key is in the cache without promoting it
    #[cfg(test)]
    fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Insert a page into the cache, returning an Arc to the image
    pub fn insert(&mut self, key: CacheKey, image: PageImage) -> Arc<PageImage> {
        let arc = Arc::new(image);
        self.cache.put(key, arc.clone());
        arc
    }

    /// Clear all cached pages
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Number of cached pages
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> PageImage {
        PageImage::new(4, 4)
    }

    #[test]
    fn cache_insert_and_get() {
        let mut cache = PageCache::new(10);
        let key = CacheKey::new(0, 1.0);

        cache.insert(key.clone(), test_image());

        assert!(cache.contains(&key));
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn scale_is_part_of_the_key() {
        let mut cache = PageCache::new(10);
        cache.insert(CacheKey::new(0, 1.0), test_image());

        assert!(!cache.contains(&CacheKey::new(0, 1.1)));
        assert!(cache.contains(&CacheKey::new(0, 1.0)));
    }

    #[test]
    fn cache_lru_eviction() {
        let mut cache = PageCache::new(2);

        for i in 0..3 {
            cache.insert(CacheKey::new(i, 1.0), test_image());
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&CacheKey::new(0, 1.0)));
        assert!(cache.contains(&CacheKey::new(1, 1.0)));
        assert!(cache.contains(&CacheKey::new(2, 1.0)));
    }

    #[test]
    fn zero_capacity_keeps_one_page() {
        let mut cache = PageCache::new(0);
        cache.insert(CacheKey::new(0, 1.0), test_image());
        cache.insert(CacheKey::new(1, 1.0), test_image());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_invalidate_all() {
        let mut cache = PageCache::new(10);
        for i in 0..5 {
            cache.insert(CacheKey::new(i, 1.0), test_image());
        }

        assert_eq!(cache.len(), 5);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
