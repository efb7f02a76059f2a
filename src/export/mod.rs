//! File export of analytics rows and inspection results
//!
//! Files are named `<prefix>_<YYYY-MM-DD>.<ext>` and written into the
//! configured export directory. Exporting an empty collection writes
//! nothing.

pub mod delimited;
pub mod json;

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::constants::export_formats;
use crate::core::error::{GscoutError, Result};
use crate::core::types::{AnalyticsRow, InspectionResult};
use crate::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => export_formats::JSON,
            ExportFormat::Csv => export_formats::CSV,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = GscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            export_formats::JSON => Ok(ExportFormat::Json),
            export_formats::CSV => Ok(ExportFormat::Csv),
            _ => Err(GscoutError::Validation(format!(
                "Unknown export format '{s}'. Expected one of: {}",
                export_formats::ALL.join(", ")
            ))),
        }
    }
}

/// `gsc_export_<site>` with every character outside `[A-Za-z0-9]`
/// replaced by `_`.
pub fn analytics_prefix(site_url: &str) -> String {
    format!("gsc_export_{}", sanitize(site_url))
}

/// `gsc_inspection_<site>`, sanitized like [`analytics_prefix`].
pub fn inspection_prefix(site_url: &str) -> String {
    format!("gsc_inspection_{}", sanitize(site_url))
}

fn sanitize(site_url: &str) -> String {
    site_url
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn file_name(prefix: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("{prefix}_{}.{}", at.format("%Y-%m-%d"), format.extension())
}

/// Writes export files into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
    at: Option<DateTime<Utc>>,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            at: None,
        }
    }

    /// Pin the export timestamp instead of using the current time.
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the written path, or `None` when `rows` is empty.
    pub fn export_analytics(
        &self,
        site_url: &str,
        rows: &[AnalyticsRow],
        format: ExportFormat,
    ) -> Result<Option<PathBuf>> {
        if rows.is_empty() {
            return Ok(None);
        }
        let at = self.timestamp();
        let bytes = match format {
            ExportFormat::Json => json::encode(site_url, rows, at)?,
            ExportFormat::Csv => delimited::encode_analytics(rows)?,
        };
        self.write(&analytics_prefix(site_url), format, at, &bytes, rows.len())
            .map(Some)
    }

    /// Returns the written path, or `None` when `results` is empty.
    pub fn export_inspection(
        &self,
        site_url: &str,
        results: &[InspectionResult],
        format: ExportFormat,
    ) -> Result<Option<PathBuf>> {
        if results.is_empty() {
            return Ok(None);
        }
        let at = self.timestamp();
        let bytes = match format {
            ExportFormat::Json => json::encode(site_url, results, at)?,
            ExportFormat::Csv => delimited::encode_inspection(results)?,
        };
        self.write(&inspection_prefix(site_url), format, at, &bytes, results.len())
            .map(Some)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }

    fn write(
        &self,
        prefix: &str,
        format: ExportFormat,
        at: DateTime<Utc>,
        bytes: &[u8],
        records: usize,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name(prefix, format, at));
        fs::write(&path, bytes)?;
        logging::log_export_written(&path, records);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 23, 59, 0).unwrap()
    }

    fn rows() -> Vec<AnalyticsRow> {
        vec![AnalyticsRow {
            keys: vec!["rust".to_string()],
            clicks: 4,
            impressions: 80,
            ctr: 0.05,
            position: 6.25,
        }]
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_prefixes_sanitize_site() {
        assert_eq!(
            analytics_prefix("https://example.com/"),
            "gsc_export_https___example_com_"
        );
        assert_eq!(
            inspection_prefix("sc-domain:example.com"),
            "gsc_inspection_sc_domain_example_com"
        );
    }

    #[test]
    fn test_file_name_uses_utc_date() {
        assert_eq!(
            file_name("gsc_export_x", ExportFormat::Csv, at()),
            "gsc_export_x_2024-05-17.csv"
        );
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(dir.path().join("out")).at(at());

        let written = exporter
            .export_analytics("https://example.com/", &[], ExportFormat::Json)
            .unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join("out").exists());

        let written = exporter
            .export_inspection("https://example.com/", &[], ExportFormat::Csv)
            .unwrap();
        assert!(written.is_none());
    }

    #[test]
    fn test_export_analytics_json_file() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(dir.path()).at(at());

        let path = exporter
            .export_analytics("https://example.com/", &rows(), ExportFormat::Json)
            .unwrap()
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "gsc_export_https___example_com__2024-05-17.json"
        );
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["rowCount"], 1);
    }

    #[test]
    fn test_export_inspection_csv_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let exporter = Exporter::new(&nested).at(at());
        let results = vec![InspectionResult::pending("https://example.com/x")];

        let path = exporter
            .export_inspection("https://example.com/", &results, ExportFormat::Csv)
            .unwrap()
            .unwrap();

        assert!(path.starts_with(&nested));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with('\u{FEFF}'));
        assert!(text.contains("\"https://example.com/x\""));
    }
}
