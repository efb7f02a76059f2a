use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::core::error::Result;

/// Export document: the rows plus the metadata needed to tell exports apart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<'a, T: Serialize> {
    pub site: &'a str,
    pub exported_at: String,
    pub row_count: usize,
    pub rows: &'a [T],
}

impl<'a, T: Serialize> ExportEnvelope<'a, T> {
    pub fn new(site: &'a str, rows: &'a [T], exported_at: DateTime<Utc>) -> Self {
        Self {
            site,
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            row_count: rows.len(),
            rows,
        }
    }
}

/// Pretty-printed JSON document for `rows`.
pub fn encode<T: Serialize>(site: &str, rows: &[T], exported_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let envelope = ExportEnvelope::new(site, rows, exported_at);
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AnalyticsRow, InspectionResult};
    use chrono::TimeZone;
    use serde_json::Value;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_envelope_fields() {
        let rows = vec![AnalyticsRow {
            keys: vec!["rust".to_string()],
            clicks: 3,
            impressions: 40,
            ctr: 0.075,
            position: 2.5,
        }];
        let bytes = encode("https://example.com/", &rows, at()).unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(doc["site"], "https://example.com/");
        assert_eq!(doc["exportedAt"], "2024-05-17T08:30:00.000Z");
        assert_eq!(doc["rowCount"], 1);
        assert_eq!(doc["rows"][0]["keys"][0], "rust");
        assert_eq!(doc["rows"][0]["clicks"], 3);
    }

    #[test]
    fn test_inspection_rows_use_camel_case() {
        let mut item = InspectionResult::pending("https://example.com/a");
        item.record_error("quota exceeded");
        let bytes = encode("https://example.com/", &[item], at()).unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(doc["rows"][0]["url"], "https://example.com/a");
        assert_eq!(doc["rows"][0]["coverageState"], "quota exceeded");
        assert_eq!(doc["rows"][0]["status"], "error");
    }
}
