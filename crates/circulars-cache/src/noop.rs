//! No-op cache implementation.

use async_trait::async_trait;
use circulars_core::{CacheKey, Circular, CircularCache, Result};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` returns `Ok(())`. Useful for
/// disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CircularCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Vec<Circular>>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _key: CacheKey, _circulars: &[Circular]) -> Result<()> {
        trace!("NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize> {
        trace!("NoopCache: purge_expired called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use chrono::Utc;
    use circulars_core::Exchange;

    #[tokio::test]
    async fn get_always_misses() {
        let cache = NoopCache::new();
        let key = CacheKey::SourceLatest(Exchange::Nse);
        let circular = Circular::new(
            "Gold Futures Contract Specifications Update",
            Utc.with_ymd_and_hms(2024, 8, 14, 11, 45, 0).unwrap(),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/gold-futures-update",
        );

        cache.put(key.clone(), &[circular]).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn management_operations_are_noops() {
        let cache = NoopCache::new();
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
        assert!(cache.clear().await.is_ok());
    }

    #[test]
    fn noop_cache_is_copy() {
        let cache1 = NoopCache::new();
        let cache2 = cache1; // Copy
        let _cache3 = cache2; // Still works because Copy
    }
}
