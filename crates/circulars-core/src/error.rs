//! Error types for circular operations.
//!
//! This module defines [`CircularError`] which covers all error cases that can
//! occur when fetching, caching, or exporting circulars.

use thiserror::Error;

/// Errors that can occur during circular operations.
#[derive(Error, Debug)]
pub enum CircularError {
    /// A per-exchange source failed to produce its records.
    #[error("Source error from {exchange}: {message}")]
    Source {
        /// The exchange whose source failed.
        exchange: String,
        /// Description of the failure.
        message: String,
    },

    /// A per-exchange source exceeded the configured fetch timeout.
    #[error("Source {0} timed out")]
    Timeout(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// No source is registered for the requested exchange.
    #[error("Source not configured: {0}")]
    SourceNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error writing exported data to a sink.
    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`CircularError`].
pub type Result<T> = std::result::Result<T, CircularError>;
