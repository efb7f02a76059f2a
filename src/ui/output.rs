//! Result rendering in text and JSON formats

use serde::Serialize;
use std::fmt::Write;

use crate::core::types::{AnalyticsRow, InspectionResult, InspectionStatus, Site, UserInfo};
use crate::dates::DateRange;
use crate::table::{Column, FilterCondition, SortDirection, SortState};
use crate::ui::color::{Colors, colorize};
use crate::ui::theme::{Palette, SemanticColor};

const MAX_KEY_WIDTH: usize = 60;

/// Everything shown for one analytics query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport<'a> {
    pub site: &'a str,
    #[serde(flatten)]
    pub date_range: &'a DateRange,
    /// Rows fetched before filtering
    pub fetched: usize,
    #[serde(skip)]
    pub sort: Option<SortState>,
    #[serde(skip)]
    pub filters: &'a [FilterCondition],
    pub rows: &'a [AnalyticsRow],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectionReport<'a> {
    site: &'a str,
    inspected: usize,
    failed: usize,
    results: &'a [InspectionResult],
}

/// Print `text` or the JSON document, never both.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) {
    if json {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{doc}"),
            Err(e) => eprintln!("Error: could not encode JSON output: {e}"),
        }
    } else {
        print!("{}", text());
    }
}

pub fn display_sites(sites: &[Site], json: bool, palette: &Palette) {
    emit(json, &sites, || render_sites(sites, palette));
}

pub fn display_user(user: &UserInfo, json: bool, palette: &Palette) {
    emit(json, user, || render_user(user, palette));
}

pub fn display_analytics(report: &AnalyticsReport<'_>, json: bool, palette: &Palette) {
    emit(json, report, || render_analytics(report, palette));
}

pub fn display_inspection(site: &str, results: &[InspectionResult], json: bool, palette: &Palette) {
    let report = InspectionReport {
        site,
        inspected: results.len(),
        failed: count_failed(results),
        results,
    };
    emit(json, &report, || render_inspection(results, palette));
}

pub fn count_failed(results: &[InspectionResult]) -> usize {
    results
        .iter()
        .filter(|r| r.status == InspectionStatus::Error)
        .count()
}

pub fn render_sites(sites: &[Site], palette: &Palette) -> String {
    if sites.is_empty() {
        return format!("{}\n", palette.paint("No properties found", SemanticColor::Muted));
    }

    let width = sites.iter().map(|s| s.site_url.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for site in sites {
        let _ = writeln!(
            out,
            "{}  {}",
            palette.paint(&pad(&site.site_url, width), SemanticColor::Url),
            palette.paint(&site.permission_level, SemanticColor::Muted)
        );
    }
    out
}

pub fn render_user(user: &UserInfo, palette: &Palette) -> String {
    match user.name {
        Some(ref name) if !name.is_empty() => format!(
            "{} {}\n",
            palette.paint(name, SemanticColor::Primary),
            palette.paint(&format!("<{}>", user.email), SemanticColor::Muted)
        ),
        _ => format!("{}\n", palette.paint(&user.email, SemanticColor::Primary)),
    }
}

pub fn render_analytics(report: &AnalyticsReport<'_>, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        palette.paint(report.site, SemanticColor::Url),
        palette.paint(&report.date_range.to_string(), SemanticColor::Muted)
    );
    for filter in report.filters {
        let _ = writeln!(out, "  {} {filter}", palette.paint("filter", SemanticColor::Muted));
    }

    if report.rows.is_empty() {
        let message = if report.fetched == 0 {
            "No data for this period".to_string()
        } else {
            format!("No rows match the filters ({} fetched)", report.fetched)
        };
        let _ = writeln!(out, "{}", palette.paint(&message, SemanticColor::Warning));
        return out;
    }

    let keys: Vec<String> = report.rows.iter().map(display_keys).collect();
    let key_width = keys
        .iter()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let header = [
        pad(&header_label(Column::Keys, "Query", report.sort), key_width),
        format!("{:>9}", header_label(Column::Clicks, "Clicks", report.sort)),
        format!("{:>12}", header_label(Column::Impressions, "Impressions", report.sort)),
        format!("{:>8}", header_label(Column::Ctr, "CTR", report.sort)),
        format!("{:>9}", header_label(Column::Position, "Position", report.sort)),
    ]
    .join("  ");
    let _ = writeln!(out, "{}", colorize(&header, Colors::BOLD));

    for (row, key) in report.rows.iter().zip(&keys) {
        let _ = writeln!(
            out,
            "{}  {:>9}  {:>12}  {:>8}  {:>9}",
            palette.paint(&pad(key, key_width), SemanticColor::Primary),
            row.clicks,
            row.impressions,
            format!("{:.2}%", row.ctr * 100.0),
            format!("{:.1}", row.position),
        );
    }

    let _ = writeln!(
        out,
        "{}",
        palette.paint(
            &format!("{} of {} row(s)", report.rows.len(), report.fetched),
            SemanticColor::Muted
        )
    );
    out
}

pub fn render_inspection(results: &[InspectionResult], palette: &Palette) -> String {
    let mut out = String::new();
    let url_width = results.iter().map(|r| r.url.chars().count()).max().unwrap_or(0);
    let verdict_width = results
        .iter()
        .map(|r| r.verdict.as_str().chars().count())
        .max()
        .unwrap_or(0);

    for item in results {
        let verdict = pad(item.verdict.as_str(), verdict_width);
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            palette.paint(&pad(&item.url, url_width), SemanticColor::Url),
            palette.paint(&verdict, Palette::verdict_color(&item.verdict)),
            item.coverage_state,
            palette.paint(&item.indexing_state, SemanticColor::Muted),
        );
    }

    let failed = count_failed(results);
    let summary = format!("{} inspected, {failed} failed", results.len());
    let color = if failed == 0 {
        SemanticColor::Success
    } else {
        SemanticColor::Error
    };
    let _ = writeln!(out, "{}", palette.paint(&summary, color));
    out
}

fn header_label(column: Column, label: &str, sort: Option<SortState>) -> String {
    match sort {
        Some(state) if state.column == column => match state.direction {
            SortDirection::Asc => format!("{label} ▲"),
            SortDirection::Desc => format!("{label} ▼"),
        },
        _ => label.to_string(),
    }
}

fn display_keys(row: &AnalyticsRow) -> String {
    let joined = row.keys.join(" | ");
    if joined.chars().count() <= MAX_KEY_WIDTH {
        joined
    } else {
        let mut truncated: String = joined.chars().take(MAX_KEY_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IndexStatusResult;

    fn row(key: &str, clicks: u64) -> AnalyticsRow {
        AnalyticsRow {
            keys: vec![key.to_string()],
            clicks,
            impressions: 200,
            ctr: clicks as f64 / 200.0,
            position: 3.456,
        }
    }

    #[test]
    fn test_render_sites() {
        let sites = vec![
            Site {
                site_url: "https://example.com/".to_string(),
                permission_level: "siteOwner".to_string(),
            },
            Site {
                site_url: "sc-domain:example.org".to_string(),
                permission_level: "siteFullUser".to_string(),
            },
        ];
        let text = render_sites(&sites, &Palette::default());

        assert!(text.contains("https://example.com/   siteOwner"));
        assert!(text.contains("sc-domain:example.org  siteFullUser"));
        assert!(render_sites(&[], &Palette::default()).contains("No properties"));
    }

    #[test]
    fn test_render_user() {
        let user = UserInfo {
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            picture: None,
        };
        assert_eq!(render_user(&user, &Palette::default()), "Ada <ada@example.com>\n");
    }

    #[test]
    fn test_render_analytics_marks_sort_column() {
        let range = DateRange::new("2024-01-01", "2024-01-07").unwrap();
        let rows = vec![row("bar", 10), row("foo", 5)];
        let report = AnalyticsReport {
            site: "https://example.com/",
            date_range: &range,
            fetched: 3,
            sort: Some(SortState::new(Column::Clicks, SortDirection::Desc)),
            filters: &[],
            rows: &rows,
        };
        let text = render_analytics(&report, &Palette::default());

        assert!(text.contains("2024-01-01 .. 2024-01-07"));
        assert!(text.contains("Clicks ▼"));
        assert!(text.contains("5.00%"));
        assert!(text.contains("3.5"));
        assert!(text.contains("2 of 3 row(s)"));
        assert!(text.find("bar").unwrap() < text.find("foo").unwrap());
    }

    #[test]
    fn test_render_analytics_empty_states() {
        let range = DateRange::new("2024-01-01", "2024-01-07").unwrap();
        let mut report = AnalyticsReport {
            site: "https://example.com/",
            date_range: &range,
            fetched: 0,
            sort: None,
            filters: &[],
            rows: &[],
        };
        assert!(render_analytics(&report, &Palette::default()).contains("No data"));

        report.fetched = 4;
        assert!(render_analytics(&report, &Palette::default()).contains("No rows match"));
    }

    #[test]
    fn test_analytics_json_shape() {
        let range = DateRange::new("2024-01-01", "2024-01-07").unwrap();
        let rows = vec![row("bar", 10)];
        let report = AnalyticsReport {
            site: "https://example.com/",
            date_range: &range,
            fetched: 1,
            sort: None,
            filters: &[],
            rows: &rows,
        };
        let doc = serde_json::to_value(&report).unwrap();

        assert_eq!(doc["startDate"], "2024-01-01");
        assert_eq!(doc["endDate"], "2024-01-07");
        assert_eq!(doc["fetched"], 1);
        assert_eq!(doc["rows"][0]["keys"][0], "bar");
    }

    #[test]
    fn test_long_keys_are_truncated() {
        let long = "x".repeat(100);
        let shown = display_keys(&row(&long, 1));
        assert_eq!(shown.chars().count(), MAX_KEY_WIDTH);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn test_render_inspection() {
        let mut ok = InspectionResult::pending("https://example.com/a");
        ok.record_success(IndexStatusResult {
            verdict: Some("PASS".to_string()),
            coverage_state: Some("Submitted and indexed".to_string()),
            indexing_state: None,
        });
        let mut bad = InspectionResult::pending("https://example.com/bb");
        bad.record_error("Permission denied");

        let results = vec![ok, bad];
        let text = render_inspection(&results, &Palette::default());

        assert!(text.contains("https://example.com/a   PASS   Submitted and indexed  N/A"));
        assert!(text.contains("Error  Permission denied"));
        assert!(text.contains("2 inspected, 1 failed"));
        assert_eq!(count_failed(&results), 1);
    }
}
