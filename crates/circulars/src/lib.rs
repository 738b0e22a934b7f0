#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified aggregation interface for simulated exchange circulars.
//!
//! This crate re-exports the core types and the cache and source
//! implementations, and provides [`CircularService`] for querying all
//! registered sources behind a TTL cache with filtering, sorting, and a
//! result cap.
//!
//! # Features
//!
//! - `nse` - National Stock Exchange source
//! - `bse` - Bombay Stock Exchange source
//! - `mcx` - Multi Commodity Exchange source
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use circulars::{CircularFilters, CircularService, InMemoryCache};
//!
//! #[tokio::main]
//! async fn main() -> circulars::Result<()> {
//!     let service = CircularService::new()
//!         .with_nse()
//!         .with_bse()
//!         .with_mcx()
//!         .set_cache(Arc::new(InMemoryCache::default()));
//!
//!     let filters = CircularFilters::new().with_query("dividend");
//!     let result = service.fetch_all(&filters).await?;
//!     for circular in &result.circulars {
//!         println!("{} [{}] {}", circular.date, circular.exchange, circular.title);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use circulars_core::*;

// Cache implementations
pub use circulars_cache::{InMemoryCache, NoopCache};

// Sources
#[cfg(feature = "bse")]
pub use circulars_bse::BseSource;
#[cfg(feature = "mcx")]
pub use circulars_mcx::McxSource;
#[cfg(feature = "nse")]
pub use circulars_nse::NseSource;

/// CSV export of circular lists.
pub mod export;

mod service;
pub use service::{
    Aggregation, CircularService, DEFAULT_MAX_RESULTS, DEFAULT_SOURCE_TIMEOUT, ServiceConfig,
    SourceFailure,
};
