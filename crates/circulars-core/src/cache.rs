//! Cache trait and typed cache keys.
//!
//! This module defines the [`CircularCache`] trait that stands between the
//! aggregation service and the per-exchange sources. Two kinds of entry share
//! one keyspace: the raw latest list per exchange, and the fully filtered
//! result per distinct filter combination.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Circular, CircularFilters, Exchange, ExchangeFilter};

/// Key for a cached circular list.
///
/// Keys are typed rather than concatenated strings, so the finite keyspace
/// (exchange x query x ex-date flag actually requested) is visible in the
/// type system.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The unfiltered latest list for one exchange.
    SourceLatest(Exchange),
    /// A filtered, sorted, capped aggregation result.
    Query {
        /// Exchange selection of the originating request.
        exchange: ExchangeFilter,
        /// Free-text query of the originating request.
        query: String,
        /// Ex-date restriction of the originating request.
        ex_date_only: bool,
    },
}

impl CacheKey {
    /// Builds the query key for one set of filter criteria.
    #[must_use]
    pub fn for_filters(filters: &CircularFilters) -> Self {
        Self::Query {
            exchange: filters.exchange,
            query: filters.query.clone(),
            ex_date_only: filters.ex_date_only,
        }
    }
}

/// Trait for caching circular lists.
///
/// Implementations decide the expiry policy; the contract only requires that
/// `get` returns what a prior `put` stored, unchanged, or nothing at all.
#[async_trait]
pub trait CircularCache: Send + Sync {
    /// Retrieves a cached list.
    ///
    /// Returns `Ok(Some(list))` on a fresh entry, `Ok(None)` on a miss or an
    /// expired entry.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<Circular>>>;

    /// Stores a list under `key`, superseding any previous entry.
    async fn put(&self, key: CacheKey, circulars: &[Circular]) -> Result<()>;

    /// Removes expired entries.
    ///
    /// Returns the number of entries removed.
    async fn purge_expired(&self) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
