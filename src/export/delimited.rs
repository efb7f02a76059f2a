//! Semicolon-separated text for spreadsheet import.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

use crate::core::error::Result;
use crate::core::types::{AnalyticsRow, InspectionResult};

pub const BOM: &str = "\u{FEFF}";
pub const DELIMITER: u8 = b';';
pub const ANALYTICS_HEADER: &str = "Query;Clicks;Impressions;CTR;Position";
pub const INSPECTION_HEADER: &str = "URL;Verdict;Coverage State;Indexing State";

/// Query text is always quoted, ctr has 4 decimals and position 2.
pub fn encode_analytics(rows: &[AnalyticsRow]) -> Result<Vec<u8>> {
    let records = rows.iter().map(|row| {
        [
            quoted(row.primary_key()),
            row.clicks.to_string(),
            row.impressions.to_string(),
            format!("{:.4}", row.ctr),
            format!("{:.2}", row.position),
        ]
    });
    encode(ANALYTICS_HEADER, QuoteStyle::Never, records)
}

/// Every field quoted.
pub fn encode_inspection(results: &[InspectionResult]) -> Result<Vec<u8>> {
    let records = results.iter().map(|item| {
        [
            item.url.clone(),
            item.verdict.to_string(),
            item.coverage_state.clone(),
            item.indexing_state.clone(),
        ]
    });
    encode(INSPECTION_HEADER, QuoteStyle::Always, records)
}

// Always quoted so numeric-looking queries stay text.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn encode<I, R>(header: &str, quote_style: QuoteStyle, records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    writeln!(out, "{BOM}{header}")?;

    {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(Terminator::Any(b'\n'))
            .quote_style(quote_style)
            .has_headers(false)
            .from_writer(&mut out);
        for record in records {
            writer.write_record(record)?;
        }
        writer.flush()?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IndexStatusResult;
    use csv::ReaderBuilder;

    fn analytics_row(key: &str, clicks: u64, ctr: f64, position: f64) -> AnalyticsRow {
        AnalyticsRow {
            keys: vec![key.to_string()],
            clicks,
            impressions: 340,
            ctr,
            position,
        }
    }

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    fn reparse(text: &str) -> Vec<Vec<String>> {
        let body = text.strip_prefix(BOM).unwrap();
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .from_reader(body.as_bytes());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_analytics_layout() {
        let text = as_text(
            encode_analytics(&[analytics_row("rust book", 12, 0.035294, 4.2)]).unwrap(),
        );

        assert!(text.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], ANALYTICS_HEADER);
        assert_eq!(lines[1], "\"rust book\";12;340;0.0353;4.20");
    }

    #[test]
    fn test_analytics_escapes_quotes() {
        let text = as_text(encode_analytics(&[analytics_row("say \"hi\"", 1, 0.5, 1.0)]).unwrap());
        assert!(text.contains("\"say \"\"hi\"\"\";1;340;0.5000;1.00"));
    }

    #[test]
    fn test_analytics_quotes_numeric_query() {
        let rows = vec![
            analytics_row("007", 1, 0.5, 1.0),
            analytics_row("2024", 3, 0.25, 2.0),
        ];
        let text = as_text(encode_analytics(&rows).unwrap());

        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[1], "\"007\";1;340;0.5000;1.00");
        assert_eq!(lines[2], "\"2024\";3;340;0.2500;2.00");
        assert_eq!(reparse(&text)[0][0], "007");
    }

    #[test]
    fn test_analytics_round_trip() {
        let rows = vec![
            analytics_row("semi;colon", 7, 0.123456, 3.14159),
            analytics_row("plain", 0, 0.0, 12.0),
        ];
        let parsed = reparse(&as_text(encode_analytics(&rows).unwrap()));

        assert_eq!(parsed.len(), 2);
        for (record, row) in parsed.iter().zip(&rows) {
            assert_eq!(record[0], row.primary_key());
            assert_eq!(record[1].parse::<u64>().unwrap(), row.clicks);
            assert_eq!(record[2].parse::<u64>().unwrap(), row.impressions);
            assert!((record[3].parse::<f64>().unwrap() - row.ctr).abs() < 0.00005 + f64::EPSILON);
            assert!((record[4].parse::<f64>().unwrap() - row.position).abs() < 0.005 + f64::EPSILON);
        }
    }

    #[test]
    fn test_inspection_layout_quotes_everything() {
        let mut item = InspectionResult::pending("https://example.com/a");
        item.record_success(IndexStatusResult {
            verdict: Some("PASS".to_string()),
            coverage_state: Some("Submitted and indexed".to_string()),
            indexing_state: Some("INDEXING_ALLOWED".to_string()),
        });
        let text = as_text(encode_inspection(&[item]).unwrap());

        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], INSPECTION_HEADER);
        assert_eq!(
            lines[1],
            "\"https://example.com/a\";\"PASS\";\"Submitted and indexed\";\"INDEXING_ALLOWED\""
        );
    }

    #[test]
    fn test_inspection_round_trip_with_error_item() {
        let mut item = InspectionResult::pending("https://example.com/b");
        item.record_error("Permission denied; check property");
        let parsed = reparse(&as_text(encode_inspection(&[item]).unwrap()));

        assert_eq!(
            parsed[0],
            vec![
                "https://example.com/b",
                "Error",
                "Permission denied; check property",
                "..."
            ]
        );
    }
}
