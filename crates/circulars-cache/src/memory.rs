//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use circulars_core::{CacheKey, Circular, CircularCache, Clock, Result, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Default time-to-live: 3 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3 * 60);

/// Cache entry with an absolute expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry {
    circulars: Vec<Circular>,
    expires_at: DateTime<Utc>,
}

/// TTL-based in-memory cache.
///
/// Entries are stored in an `RwLock`-protected `HashMap` and expire a fixed
/// time-to-live after they are stored. A lookup at or past the expiry instant
/// is a miss and evicts the entry. There is no size bound or LRU policy; the
/// keyspace is bounded by the filter combinations actually requested.
///
/// The time source is injectable for deterministic expiry tests.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    /// Creates a cache with the given time-to-live, using the wall clock.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock::new()))
    }

    /// Creates a cache with the given time-to-live and time source.
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl CircularCache for InMemoryCache {
    #[instrument(skip(self))]
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<Circular>>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > self.clock.now() => {
                    debug!("Cache hit");
                    return Ok(Some(entry.circulars.clone()));
                }
                Some(_) => {} // expired, evict below
                None => {
                    debug!("Cache miss");
                    return Ok(None);
                }
            }
        }

        // Re-check under the write lock: the entry may have been refreshed
        // between the two lock acquisitions.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > self.clock.now() {
                debug!("Cache hit");
                return Ok(Some(entry.circulars.clone()));
            }
            entries.remove(key);
            debug!("Evicted expired entry");
        }
        Ok(None)
    }

    #[instrument(skip(self, circulars), fields(count = circulars.len()))]
    async fn put(&self, key: CacheKey, circulars: &[Circular]) -> Result<()> {
        let expires_at = self.expiry_from(self.clock.now());
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                circulars: circulars.to_vec(),
                expires_at,
            },
        );
        debug!("Cached {} circulars", circulars.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!("Purged {} expired cache entries", removed);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
