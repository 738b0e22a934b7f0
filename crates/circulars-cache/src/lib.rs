#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for exchange circular aggregation.
//!
//! This crate provides implementations of the [`CircularCache`] trait from
//! `circulars-core`:
//!
//! - [`InMemoryCache`] - TTL-based in-memory cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use circulars_core::CircularCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
