//! Date normalization, ex-date detection, and id derivation.
//!
//! These helpers canonicalize the loosely formatted metadata that exchange
//! circulars arrive with: free-form date strings, headline text, and the
//! absence of any stable upstream identifier.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use regex::Regex;

use crate::types::Exchange;

/// Maximum length of a derived circular id.
pub const MAX_ID_LEN: usize = 22;

/// Title keywords that mark a circular as ex-date relevant.
const EX_DATE_KEYWORDS: &[&str] = &[
    "ex-date",
    "ex date",
    "book closure",
    "record date",
    "dividend",
    "rights issue",
];

/// Day-month-year with `-` or `/` separators and a 2- or 4-digit year.
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})").expect("day-month-year pattern is valid")
});

/// How [`normalize_date`] arrived at its timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateOrigin {
    /// The input parsed directly as a date-time or plain date.
    Parsed,
    /// The input matched the `D[-/]M[-/]Y` pattern.
    PatternMatched,
    /// The input was unparseable; the timestamp is the supplied fallback
    /// instant.
    Defaulted,
}

/// A best-effort normalized timestamp, tagged with how it was obtained.
///
/// The tag lets callers distinguish "unknown date, defaulted to now" from a
/// genuine current-instant record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizedDate {
    /// The normalized instant.
    pub timestamp: DateTime<Utc>,
    /// How the instant was obtained.
    pub origin: DateOrigin,
}

impl NormalizedDate {
    /// Returns true if the input was unparseable and the timestamp is the
    /// fallback instant.
    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self.origin, DateOrigin::Defaulted)
    }
}

/// Encodes an instant in the canonical round-trippable form:
/// RFC 3339 with seconds precision and a `Z` suffix.
#[must_use]
pub fn canonical_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Normalizes a free-form date string to an instant, never failing.
///
/// Attempts, in order: RFC 3339, plain `YYYY-MM-DD` (midnight UTC), and a
/// `D[-/]M[-/]Y` pattern where a 2-digit year means 2000+YY. Anything else
/// yields `now` tagged [`DateOrigin::Defaulted`]. An extracted day/month/year
/// triple that is not a real calendar date also falls back.
#[must_use]
pub fn normalize_date(input: &str, now: DateTime<Utc>) -> NormalizedDate {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return NormalizedDate {
            timestamp: parsed.with_timezone(&Utc),
            origin: DateOrigin::Parsed,
        };
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return NormalizedDate {
            timestamp: midnight_utc(date),
            origin: DateOrigin::Parsed,
        };
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(trimmed) {
        // Captures are all-digit by construction, so the parses cannot fail.
        let day: u32 = caps[1].parse().unwrap_or_default();
        let month: u32 = caps[2].parse().unwrap_or_default();
        let year_digits = &caps[3];
        let mut year: i32 = year_digits.parse().unwrap_or_default();
        if year_digits.len() == 2 {
            year += 2000;
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return NormalizedDate {
                timestamp: midnight_utc(date),
                origin: DateOrigin::PatternMatched,
            };
        }
    }

    NormalizedDate {
        timestamp: now,
        origin: DateOrigin::Defaulted,
    }
}

/// Returns true if the title marks an ex-date relevant event.
///
/// Pure lower-cased substring matching against a fixed keyword set; no
/// tokenization or stemming.
#[must_use]
pub fn is_ex_date_related(title: &str) -> bool {
    let lowered = title.to_lowercase();
    EX_DATE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Derives a short, stable id from a circular's title, canonical date, and
/// exchange.
///
/// The fields are joined with `|`, base64-encoded, stripped of
/// non-alphanumerics, and truncated to [`MAX_ID_LEN`] characters. This is a
/// convenience fingerprint, not a hash: determinism is the only guaranteed
/// property, and two distinct inputs can collide after truncation.
#[must_use]
pub fn make_id(title: &str, date: &str, exchange: Exchange) -> String {
    let joined = format!("{}|{title}|{date}", exchange.as_str());
    STANDARD
        .encode(joined)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_ID_LEN)
        .collect()
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fallback_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn canonical_encoding_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 8, 15, 10, 30, 0).unwrap();
        assert_eq!(canonical_timestamp(&date), "2024-08-15T10:30:00Z");
    }

    #[test]
    fn rfc3339_input_parses_directly() {
        let normalized = normalize_date("2024-08-15T10:30:00Z", fallback_instant());
        assert_eq!(normalized.origin, DateOrigin::Parsed);
        assert_eq!(
            canonical_timestamp(&normalized.timestamp),
            "2024-08-15T10:30:00Z"
        );
    }

    #[test]
    fn offset_input_converts_to_utc() {
        let normalized = normalize_date("2024-08-15T16:00:00+05:30", fallback_instant());
        assert_eq!(normalized.origin, DateOrigin::Parsed);
        assert_eq!(
            canonical_timestamp(&normalized.timestamp),
            "2024-08-15T10:30:00Z"
        );
    }

    #[test]
    fn plain_date_parses_at_midnight() {
        let normalized = normalize_date("2024-08-15", fallback_instant());
        assert_eq!(normalized.origin, DateOrigin::Parsed);
        assert_eq!(
            canonical_timestamp(&normalized.timestamp),
            "2024-08-15T00:00:00Z"
        );
    }

    #[test]
    fn day_month_year_pattern_matches() {
        let normalized = normalize_date("15-08-2024", fallback_instant());
        assert_eq!(normalized.origin, DateOrigin::PatternMatched);
        assert_eq!(
            canonical_timestamp(&normalized.timestamp),
            "2024-08-15T00:00:00Z"
        );

        let slashes = normalize_date("5/8/2024", fallback_instant());
        assert_eq!(slashes.origin, DateOrigin::PatternMatched);
        assert_eq!(
            canonical_timestamp(&slashes.timestamp),
            "2024-08-05T00:00:00Z"
        );
    }

    #[test]
    fn two_digit_year_means_2000s() {
        let normalized = normalize_date("15-08-24", fallback_instant());
        assert_eq!(normalized.origin, DateOrigin::PatternMatched);
        assert_eq!(
            canonical_timestamp(&normalized.timestamp),
            "2024-08-15T00:00:00Z"
        );
    }

    #[test]
    fn garbage_defaults_to_fallback_instant() {
        let normalized = normalize_date("sometime soon", fallback_instant());
        assert!(normalized.is_defaulted());
        assert_eq!(normalized.timestamp, fallback_instant());
    }

    #[test]
    fn impossible_calendar_date_defaults() {
        let normalized = normalize_date("45-45-2024", fallback_instant());
        assert!(normalized.is_defaulted());
        assert_eq!(normalized.timestamp, fallback_instant());
    }

    #[test]
    fn ex_date_keywords_match_case_insensitively() {
        assert!(is_ex_date_related("Ex-Date for Dividend Payment - RELIANCE"));
        assert!(is_ex_date_related("BOOK CLOSURE for Rights Issue"));
        assert!(is_ex_date_related("Record date announced"));
        assert!(!is_ex_date_related("New Margin Requirements for F&O Segment"));
        assert!(!is_ex_date_related("System Maintenance Notice"));
    }

    #[test]
    fn make_id_is_deterministic_and_bounded() {
        let first = make_id("Ex-Date for Dividend Payment", "2024-08-15T10:30:00Z", Exchange::Nse);
        let second = make_id("Ex-Date for Dividend Payment", "2024-08-15T10:30:00Z", Exchange::Nse);
        assert_eq!(first, second);
        assert!(first.len() <= MAX_ID_LEN);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn make_id_distinguishes_exchanges() {
        let nse = make_id("Trading Holiday", "2024-08-14T16:00:00Z", Exchange::Nse);
        let bse = make_id("Trading Holiday", "2024-08-14T16:00:00Z", Exchange::Bse);
        assert_ne!(nse, bse);
    }
}
