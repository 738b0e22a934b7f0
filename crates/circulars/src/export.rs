//! CSV export of circular lists.
//!
//! Serialization is separated from file delivery: [`circulars_to_csv`]
//! produces the text and [`write_circulars_csv`] writes it into any
//! [`std::io::Write`] sink. Handing the bytes to a file-saving mechanism is
//! the hosting environment's responsibility.

use std::io::Write;

use circulars_core::{Circular, Result, normalize};

/// Conventional filename for an exported circular list.
pub const DEFAULT_EXPORT_FILENAME: &str = "circulars.csv";

const CSV_HEADER: &str = "ID,Title,Date,Exchange,Category,URL";

/// Serializes circulars to CSV text.
///
/// Every field is double-quoted with embedded quotes doubled. A missing
/// category serializes as the empty string and the date uses the canonical
/// timestamp encoding. Rows are joined with `\n` and there is no trailing
/// newline.
#[must_use]
pub fn circulars_to_csv(circulars: &[Circular]) -> String {
    let mut lines = Vec::with_capacity(circulars.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for circular in circulars {
        let row = [
            quote(&circular.id),
            quote(&circular.title),
            quote(&normalize::canonical_timestamp(&circular.date)),
            quote(circular.exchange.as_str()),
            quote(circular.category.as_deref().unwrap_or_default()),
            quote(&circular.url),
        ]
        .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

/// Serializes circulars to CSV and writes the text into `sink`.
pub fn write_circulars_csv<W: Write>(circulars: &[Circular], sink: &mut W) -> Result<()> {
    sink.write_all(circulars_to_csv(circulars).as_bytes())?;
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use circulars_core::Exchange;

    #[test]
    fn quoting_doubles_embedded_quotes() {
        let circular = Circular {
            id: "1".to_string(),
            title: "A \"B\"".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            exchange: Exchange::Nse,
            url: "http://x".to_string(),
            category: None,
        };

        let csv = circulars_to_csv(&[circular]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID,Title,Date,Exchange,Category,URL"));
        assert_eq!(
            lines.next(),
            Some(r#""1","A ""B""","2024-01-01T00:00:00Z","NSE","","http://x""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_list_exports_header_only() {
        assert_eq!(circulars_to_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn category_is_included_when_present() {
        let circular = Circular::new(
            "Launch of Silver Options Contracts",
            Utc.with_ymd_and_hms(2024, 8, 13, 10, 15, 0).unwrap(),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/silver-options-launch",
        )
        .with_category("Trading");

        let csv = circulars_to_csv(&[circular.clone()]);
        let body = csv.lines().nth(1).unwrap();
        assert!(body.contains("\"Trading\""));
        assert!(body.contains(&format!("\"{}\"", circular.id)));
        assert!(body.contains("\"2024-08-13T10:15:00Z\""));
    }

    #[test]
    fn writes_into_any_sink() {
        let circular = Circular::new(
            "Extension of Crude Oil Trading Hours",
            Utc.with_ymd_and_hms(2024, 8, 12, 16, 30, 0).unwrap(),
            Exchange::Mcx,
            "https://www.mcxindia.com/circular/crude-oil-hours",
        );

        let mut sink = Vec::new();
        write_circulars_csv(&[circular.clone()], &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            circulars_to_csv(&[circular])
        );
    }
}
