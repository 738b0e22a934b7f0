//! Aggregation service for circulars from multiple exchange sources.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use circulars_core::{
    CacheKey, Circular, CircularCache, CircularError, CircularFilters, CircularSource, Exchange,
    Result, normalize,
};

/// Default maximum number of records returned by one aggregation call.
pub const DEFAULT_MAX_RESULTS: usize = 300;

/// Default per-source fetch timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning knobs for [`CircularService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum number of records returned by one aggregation call.
    pub max_results: usize,
    /// Per-source fetch timeout. A source slower than this is treated like a
    /// failed source. `None` disables the timeout.
    pub source_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            source_timeout: Some(DEFAULT_SOURCE_TIMEOUT),
        }
    }
}

/// One source that failed during an aggregation call.
#[derive(Debug)]
pub struct SourceFailure {
    /// The exchange whose source failed.
    pub exchange: Exchange,
    /// What went wrong.
    pub error: CircularError,
}

/// The outcome of one aggregation call.
///
/// A failed source degrades the result instead of aborting it: `circulars`
/// holds everything the succeeding sources produced, and `failures` names the
/// sources that contributed nothing and why.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Merged, filtered, sorted, capped records.
    pub circulars: Vec<Circular>,
    /// Sources that failed during this call. Empty on a cache hit.
    pub failures: Vec<SourceFailure>,
}

impl Aggregation {
    /// Returns true if at least one source failed and the result may be
    /// incomplete.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Aggregation service over per-exchange circular sources.
///
/// Sources are queried concurrently behind two cache layers: one entry per
/// exchange for the raw latest list, and one entry per distinct filter
/// combination for the finished result. Merge order follows registration
/// order, conventionally NSE, BSE, MCX.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use circulars::{CircularFilters, CircularService, InMemoryCache};
///
/// let service = CircularService::new()
///     .with_nse()
///     .with_bse()
///     .with_mcx()
///     .set_cache(Arc::new(InMemoryCache::default()));
///
/// let result = service
///     .fetch_all(&CircularFilters::new().with_query("dividend"))
///     .await?;
/// ```
#[derive(Default)]
pub struct CircularService {
    sources: Vec<Arc<dyn CircularSource>>,
    cache: Option<Arc<dyn CircularCache>>,
    config: ServiceConfig,
}

impl std::fmt::Debug for CircularService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularService")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .field("config", &self.config)
            .finish()
    }
}

impl CircularService {
    /// Creates a new service with no sources and no cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new service with a cache.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn CircularCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Default::default()
        }
    }

    /// Sets the cache for this service.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn CircularCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a circular source. Merge order follows registration order.
    pub fn register_source(&mut self, source: Arc<dyn CircularSource>) {
        debug!(source = source.name(), "Registering circular source");
        self.sources.push(source);
    }

    /// Add the NSE source.
    #[cfg(feature = "nse")]
    #[must_use]
    pub fn with_nse(mut self) -> Self {
        self.register_source(Arc::new(circulars_nse::NseSource::new()));
        self
    }

    /// Add the BSE source.
    #[cfg(feature = "bse")]
    #[must_use]
    pub fn with_bse(mut self) -> Self {
        self.register_source(Arc::new(circulars_bse::BseSource::new()));
        self
    }

    /// Add the MCX source.
    #[cfg(feature = "mcx")]
    #[must_use]
    pub fn with_mcx(mut self) -> Self {
        self.register_source(Arc::new(circulars_mcx::McxSource::new()));
        self
    }

    /// Fetches, filters, sorts, and caps circulars from every source matching
    /// the criteria.
    ///
    /// Matching sources are queried concurrently. A source that fails or
    /// times out is reported in [`Aggregation::failures`] while the call
    /// proceeds with partial data; if every source fails the result is an
    /// empty list, not an error. Results are sorted by date descending
    /// (stable, so equal instants keep merge order) and truncated to
    /// [`ServiceConfig::max_results`].
    pub async fn fetch_all(&self, filters: &CircularFilters) -> Result<Aggregation> {
        let query_key = CacheKey::for_filters(filters);
        if let Some(cache) = &self.cache {
            if let Ok(Some(cached)) = cache.get(&query_key).await {
                debug!("Cache hit for aggregated query");
                return Ok(Aggregation {
                    circulars: cached,
                    failures: Vec::new(),
                });
            }
        }

        let lookups = self
            .sources
            .iter()
            .filter(|source| filters.exchange.matches(source.exchange()))
            .map(|source| async move {
                (source.exchange(), self.fetch_source(source.as_ref()).await)
            });
        let outcomes = join_all(lookups).await;

        let mut merged = Vec::new();
        let mut failures = Vec::new();
        for (exchange, outcome) in outcomes {
            match outcome {
                Ok(circulars) => merged.extend(circulars),
                Err(error) => {
                    warn!(
                        exchange = %exchange,
                        error = %error,
                        "Source failed, continuing with partial data"
                    );
                    failures.push(SourceFailure { exchange, error });
                }
            }
        }

        let mut circulars = apply_filters(merged, filters);
        circulars.sort_by(|a, b| b.date.cmp(&a.date));
        circulars.truncate(self.config.max_results);

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.put(query_key, &circulars).await {
                warn!(error = %error, "Failed to cache aggregated query");
            }
        }

        Ok(Aggregation {
            circulars,
            failures,
        })
    }

    /// Like [`fetch_all`](Self::fetch_all), discarding the failure detail.
    ///
    /// This is the narrow list-only contract for callers that only render
    /// whatever data is available.
    pub async fn fetch_all_circulars(&self, filters: &CircularFilters) -> Result<Vec<Circular>> {
        Ok(self.fetch_all(filters).await?.circulars)
    }

    /// Fetches the latest unfiltered circulars for a single exchange,
    /// cache-backed.
    ///
    /// Unlike [`fetch_all`](Self::fetch_all), a source failure here is an
    /// error: there is no partial result to fall back to.
    pub async fn fetch_exchange(&self, exchange: Exchange) -> Result<Vec<Circular>> {
        let source = self
            .sources
            .iter()
            .find(|source| source.exchange() == exchange)
            .ok_or_else(|| CircularError::SourceNotConfigured(exchange.to_string()))?;
        self.fetch_source(source.as_ref()).await
    }

    /// One cache-backed, timeout-bounded source lookup.
    async fn fetch_source(&self, source: &dyn CircularSource) -> Result<Vec<Circular>> {
        let key = CacheKey::SourceLatest(source.exchange());
        if let Some(cache) = &self.cache {
            if let Ok(Some(cached)) = cache.get(&key).await {
                debug!(source = source.name(), "Cache hit for latest circulars");
                return Ok(cached);
            }
        }

        debug!(source = source.name(), "Fetching latest circulars");
        let fetched = match self.config.source_timeout {
            Some(limit) => tokio::time::timeout(limit, source.fetch_latest())
                .await
                .map_err(|_| CircularError::Timeout(source.name().to_string()))??,
            None => source.fetch_latest().await?,
        };

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.put(key, &fetched).await {
                warn!(
                    source = source.name(),
                    error = %error,
                    "Failed to cache latest circulars"
                );
            }
        }
        Ok(fetched)
    }
}

/// Applies the free-text and ex-date filters.
fn apply_filters(circulars: Vec<Circular>, filters: &CircularFilters) -> Vec<Circular> {
    let mut filtered = circulars;

    let query = filters.query.trim().to_lowercase();
    if !query.is_empty() {
        filtered.retain(|circular| {
            circular.title.to_lowercase().contains(&query)
                || circular
                    .category
                    .as_ref()
                    .is_some_and(|category| category.to_lowercase().contains(&query))
        });
    }

    if filters.ex_date_only {
        filtered.retain(|circular| normalize::is_ex_date_related(&circular.title));
    }

    filtered
}
