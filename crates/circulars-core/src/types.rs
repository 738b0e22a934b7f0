//! Core data types for exchange circulars.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Exchange`] - The closed set of simulated trading venues
//! - [`Circular`] - One regulatory/market announcement
//! - [`ExchangeFilter`] - Exchange selection for a query
//! - [`CircularFilters`] - Filter criteria for one aggregation call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CircularError;
use crate::normalize;

/// A simulated trading venue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange.
    #[serde(rename = "NSE")]
    Nse,
    /// Bombay Stock Exchange.
    #[serde(rename = "BSE")]
    Bse,
    /// Multi Commodity Exchange.
    #[serde(rename = "MCX")]
    Mcx,
}

impl Exchange {
    /// All exchanges, in the conventional merge order.
    pub const ALL: [Self; 3] = [Self::Nse, Self::Bse, Self::Mcx];

    /// Returns the canonical uppercase code for this exchange.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nse => "NSE",
            Self::Bse => "BSE",
            Self::Mcx => "MCX",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = CircularError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NSE" => Ok(Self::Nse),
            "BSE" => Ok(Self::Bse),
            "MCX" => Ok(Self::Mcx),
            other => Err(CircularError::InvalidParameter(format!(
                "unknown exchange: {other}"
            ))),
        }
    }
}

/// One regulatory/market announcement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circular {
    /// Deterministic fingerprint of (exchange, title, date). Stable but not
    /// guaranteed unique; see [`normalize::make_id`].
    pub id: String,
    /// Human-readable headline.
    pub title: String,
    /// Publication instant.
    pub date: DateTime<Utc>,
    /// Issuing exchange.
    pub exchange: Exchange,
    /// Absolute link to the source document.
    pub url: String,
    /// Optional classification (e.g. "Corporate Action"). `None` means
    /// uncategorized.
    pub category: Option<String>,
}

impl Circular {
    /// Creates a new circular, deriving its id from the exchange, title, and
    /// canonical date encoding.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        date: DateTime<Utc>,
        exchange: Exchange,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let id = normalize::make_id(&title, &normalize::canonical_timestamp(&date), exchange);
        Self {
            id,
            title,
            date,
            exchange,
            url: url.into(),
            category: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Exchange selection for one aggregation call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExchangeFilter {
    /// Query every exchange.
    #[default]
    All,
    /// Query a single exchange.
    Only(Exchange),
}

impl ExchangeFilter {
    /// Returns true if circulars from `exchange` pass this filter.
    #[must_use]
    pub fn matches(&self, exchange: Exchange) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == exchange,
        }
    }
}

/// Filter criteria for one aggregation call.
///
/// Constructed by the caller per request and immutable for the duration of
/// the call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CircularFilters {
    /// Which exchanges to query.
    pub exchange: ExchangeFilter,
    /// Free-text query matched case-insensitively against title and category.
    /// Ignored when empty after trimming.
    pub query: String,
    /// When true, keep only circulars whose title matches the ex-date
    /// keyword set.
    pub ex_date_only: bool,
}

impl CircularFilters {
    /// Creates the default criteria: all exchanges, no query, no ex-date
    /// restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the criteria to a single exchange.
    #[must_use]
    pub fn for_exchange(exchange: Exchange) -> Self {
        Self {
            exchange: ExchangeFilter::Only(exchange),
            ..Self::default()
        }
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restricts results to ex-date relevant circulars.
    #[must_use]
    pub const fn only_ex_dates(mut self) -> Self {
        self.ex_date_only = true;
        self
    }
}
