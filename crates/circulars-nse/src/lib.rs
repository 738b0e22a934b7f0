#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Simulated NSE circular source.
//!
//! Returns a fixed list of NSE circulars after a simulated network delay.
//!
//! # Example
//!
//! ```
//! use circulars_nse::NseSource;
//! use circulars_core::CircularSource;
//!
//! # async fn example() -> circulars_core::Result<()> {
//! let source = NseSource::without_latency();
//! let circulars = source.fetch_latest().await?;
//! println!("Fetched {} circulars", circulars.len());
//! # Ok(())
//! # }
//! ```

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use circulars_core::{Circular, CircularSource, Exchange, Result};
use tokio::time::sleep;
use tracing::debug;

/// Simulated round-trip latency window in milliseconds.
const LATENCY_WINDOW_MS: Range<u64> = 500..1500;

/// Simulated NSE circular source.
#[derive(Debug, Clone)]
pub struct NseSource {
    simulate_latency: bool,
}

impl NseSource {
    /// Creates a source that simulates NSE fetch latency.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            simulate_latency: true,
        }
    }

    /// Creates a source that returns immediately. Intended for tests and
    /// offline use.
    #[must_use]
    pub const fn without_latency() -> Self {
        Self {
            simulate_latency: false,
        }
    }
}

impl Default for NseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CircularSource for NseSource {
    fn exchange(&self) -> Exchange {
        Exchange::Nse
    }

    fn name(&self) -> &str {
        "nse"
    }

    fn description(&self) -> &str {
        "National Stock Exchange circulars - simulated feed of regulatory, \
         corporate action, and market update notices"
    }

    async fn fetch_latest(&self) -> Result<Vec<Circular>> {
        if self.simulate_latency {
            let delay = Duration::from_millis(fastrand::u64(LATENCY_WINDOW_MS));
            debug!(delay_ms = delay.as_millis() as u64, "Simulating NSE fetch latency");
            sleep(delay).await;
        }
        Ok(latest_circulars())
    }
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("fixture timestamp is valid")
}

fn latest_circulars() -> Vec<Circular> {
    vec![
        Circular::new(
            "Ex-Date for Dividend Payment - RELIANCE",
            ts(2024, 8, 15, 10, 30),
            Exchange::Nse,
            "https://www.nseindia.com/circular/reliance-dividend-2024",
        )
        .with_category("Corporate Action"),
        Circular::new(
            "New Margin Requirements for F&O Segment",
            ts(2024, 8, 14, 14, 15),
            Exchange::Nse,
            "https://www.nseindia.com/circular/fo-margin-2024",
        )
        .with_category("Regulatory"),
        Circular::new(
            "System Maintenance Notice - Weekend Downtime",
            ts(2024, 8, 14, 9, 0),
            Exchange::Nse,
            "https://www.nseindia.com/circular/system-maintenance",
        )
        .with_category("Market Update"),
        Circular::new(
            "Record Date for Bonus Issue - TCS (1:1 Ratio)",
            ts(2024, 8, 13, 16, 45),
            Exchange::Nse,
            "https://www.nseindia.com/circular/tcs-bonus-2024",
        )
        .with_category("Corporate Action"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn source_metadata() {
        let source = NseSource::new();
        assert_eq!(source.exchange(), Exchange::Nse);
        assert_eq!(source.name(), "nse");
        assert!(!source.description().is_empty());
    }

    #[test]
    fn fixture_records_belong_to_nse() {
        let circulars = latest_circulars();
        assert_eq!(circulars.len(), 4);
        assert!(circulars.iter().all(|c| c.exchange == Exchange::Nse));
        assert!(circulars.iter().all(|c| c.category.is_some()));
    }

    #[test]
    fn fixture_ids_are_unique_and_stable() {
        let first = latest_circulars();
        let second = latest_circulars();
        assert_eq!(first, second);

        let ids: HashSet<_> = first.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), first.len());
    }

    #[tokio::test]
    async fn fetch_without_latency_returns_fixtures() {
        let source = NseSource::without_latency();
        let circulars = source.fetch_latest().await.unwrap();
        assert_eq!(circulars, latest_circulars());
        assert!(
            circulars
                .iter()
                .any(|c| c.title.contains("Dividend Payment - RELIANCE"))
        );
    }
}
