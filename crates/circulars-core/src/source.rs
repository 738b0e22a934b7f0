//! Source trait for fetching circulars per exchange.
//!
//! Each simulated exchange implements [`CircularSource`]. Sources are pure
//! producers: caching and degradation policy live in the aggregation service,
//! not here.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;
use crate::types::{Circular, Exchange};

/// A per-exchange producer of circulars.
///
/// Implementations must be cheap to share (`Send + Sync`); the aggregation
/// service holds them behind `Arc` and may invoke several concurrently.
#[async_trait]
pub trait CircularSource: Send + Sync + Debug {
    /// The exchange this source covers.
    fn exchange(&self) -> Exchange;

    /// Short stable name, used in cache keys and log fields.
    fn name(&self) -> &str;

    /// Returns a description of this source.
    fn description(&self) -> &str;

    /// Fetches the latest circulars for this exchange.
    ///
    /// Returned records are unfiltered and in source order; the aggregation
    /// service applies filtering, sorting, and capping.
    async fn fetch_latest(&self) -> Result<Vec<Circular>>;
}
