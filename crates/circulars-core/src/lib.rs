#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for exchange circular aggregation.
//!
//! This crate provides the foundational abstractions for working with
//! exchange circulars:
//!
//! - [`Circular`](types::Circular) - One regulatory announcement
//! - [`CircularSource`](source::CircularSource) - Trait for per-exchange sources
//! - [`CircularCache`](cache::CircularCache) - Caching abstraction with typed keys
//! - [`Clock`](clock::Clock) - Time source, injectable for deterministic tests
//! - [`normalize`] - Date canonicalization, ex-date detection, id derivation

/// Cache trait and typed cache keys.
pub mod cache;
/// Time sources for cache expiry.
pub mod clock;
/// Error types for circular operations.
pub mod error;
/// Date normalization, ex-date detection, and id derivation.
pub mod normalize;
/// Source trait for fetching circulars per exchange.
pub mod source;
/// Core data types (Circular, Exchange, filters).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{CacheKey, CircularCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CircularError, Result};
pub use source::CircularSource;
pub use types::{Circular, CircularFilters, Exchange, ExchangeFilter};
