#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Simulated BSE circular source.
//!
//! Returns a fixed list of BSE circulars after a simulated network delay.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use circulars_core::{Circular, CircularSource, Exchange, Result};
use tokio::time::sleep;
use tracing::debug;

/// Simulated round-trip latency window in milliseconds.
const LATENCY_WINDOW_MS: Range<u64> = 600..1400;

/// Simulated BSE circular source.
#[derive(Debug, Clone)]
pub struct BseSource {
    simulate_latency: bool,
}

impl BseSource {
    /// Creates a source that simulates BSE fetch latency.
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

impl Default for BseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CircularSource for BseSource {
    fn exchange(&self) -> Exchange {
        Exchange::Bse
    }

    fn name(&self) -> &str {
        "bse"
    }

    fn description(&self) -> &str {
        "Bombay Stock Exchange circulars - simulated feed of corporate action, \
         compliance, and market update notices"
    }

    async fn fetch_latest(&self) -> Result<Vec<Circular>> {
        if self.simulate_latency {
            let delay = Duration::from_millis(fastrand::u64(LATENCY_WINDOW_MS));
            debug!(delay_ms = delay.as_millis() as u64, "Simulating BSE fetch latency");
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
            "Trading Holiday on Account of Independence Day",
            ts(2024, 8, 14, 16, 0),
            Exchange::Bse,
            "https://www.bseindia.com/circular/independence-day-2024",
        )
        .with_category("Market Update"),
        Circular::new(
            "Book Closure for Rights Issue - TATA STEEL (1:20 Ratio)",
            ts(2024, 8, 13, 15, 30),
            Exchange::Bse,
            "https://www.bseindia.com/circular/tata-steel-rights-2024",
        )
        .with_category("Corporate Action"),
        Circular::new(
            "Updated KYC Guidelines for Market Participants",
            ts(2024, 8, 13, 11, 20),
            Exchange::Bse,
            "https://www.bseindia.com/circular/kyc-guidelines-2024",
        )
        .with_category("Compliance"),
        Circular::new(
            "Ex-Date for Special Dividend - HDFC Bank",
            ts(2024, 8, 12, 14, 30),
            Exchange::Bse,
            "https://www.bseindia.com/circular/hdfc-special-dividend",
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
        let source = BseSource::new();
        assert_eq!(source.exchange(), Exchange::Bse);
        assert_eq!(source.name(), "bse");
        assert!(!source.description().is_empty());
    }

    #[test]
    fn fixture_records_belong_to_bse() {
        let circulars = latest_circulars();
        assert_eq!(circulars.len(), 4);
        assert!(circulars.iter().all(|c| c.exchange == Exchange::Bse));
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
        let source = BseSource::without_latency();
        let circulars = source.fetch_latest().await.unwrap();
        assert_eq!(circulars, latest_circulars());
        assert!(
            circulars
                .iter()
                .any(|c| c.title.contains("Special Dividend - HDFC Bank"))
        );
    }
}
