#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/circulardesk/circulars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Simulated MCX circular source.
//!
//! Returns a fixed list of MCX circulars after a simulated network delay.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use circulars_core::{Circular, CircularSource, Exchange, Result};
use tokio::time::sleep;
use tracing::debug;

/// Simulated round-trip latency window in milliseconds.
const LATENCY_WINDOW_MS: Range<u64> = 400..1300;

/// Simulated MCX circular source.
#[derive(Debug, Clone)]
pub struct McxSource {
    simulate_latency: bool,
}

impl McxSource {
    /// Creates a source that simulates MCX fetch latency.
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

impl Default for McxSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CircularSource for McxSource {
    fn exchange(&self) -> Exchange {
        Exchange::Mcx
    }

    fn name(&self) -> &str {
        "mcx"
    }

    fn description(&self) -> &str {
        "Multi Commodity Exchange circulars - simulated feed of contract \
         specification and trading notices"
    }

    async fn fetch_latest(&self) -> Result<Vec<Circular>> {
        if self.simulate_latency {
            let delay = Duration::from_millis(fastrand::u64(LATENCY_WINDOW_MS));
            debug!(delay_ms = delay.as_millis() as u64, "Simulating MCX fetch latency");
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
            "Gold Futures Contract Specifications Update",
            ts(2024, 8, 14, 11, 45),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/gold-futures-update",
        )
        .with_category("Trading"),
        Circular::new(
            "Launch of Silver Options Contracts",
            ts(2024, 8, 13, 10, 15),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/silver-options-launch",
        )
        .with_category("Trading"),
        Circular::new(
            "Extension of Crude Oil Trading Hours",
            ts(2024, 8, 12, 16, 30),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/crude-oil-hours",
        )
        .with_category("Market Update"),
    ]
}
