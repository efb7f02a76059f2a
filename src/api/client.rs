use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::http::{build_http_client, endpoint, get_json, parse_base, post_json};
use crate::config::Config;
use crate::core::constants::analytics;
use crate::core::error::Result;
use crate::core::types::{AnalyticsRow, IndexStatusResult, Site};
use crate::dates::DateRange;

/// The three remote resources the tool reads.
///
/// Implementations attach `token` as a bearer credential. None of them
/// retries or rate-limits; sequencing is the caller's job.
#[async_trait]
pub trait SearchConsoleApi: Send + Sync {
    async fn list_sites(&self, token: &str) -> Result<Vec<Site>>;

    async fn query_analytics(
        &self,
        token: &str,
        site_url: &str,
        query: &AnalyticsQuery,
    ) -> Result<Vec<AnalyticsRow>>;

    async fn inspect_url(
        &self,
        token: &str,
        site_url: &str,
        target_url: &str,
    ) -> Result<IndexStatusResult>;
}

/// Parameters of one search analytics query.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsQuery {
    pub date_range: DateRange,
    pub dimensions: Vec<String>,
    pub row_limit: Option<u32>,
}

impl AnalyticsQuery {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            dimensions: vec![analytics::QUERY_DIMENSION.to_string()],
            row_limit: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Vec<String>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = Some(row_limit);
        self
    }

    /// Request body with the row limit clamped to `1..=max_row_limit` and the
    /// `query` dimension always present and first.
    pub fn to_request(&self, max_row_limit: u32) -> SearchAnalyticsRequest {
        let mut dimensions: Vec<String> = self
            .dimensions
            .iter()
            .filter(|d| d.as_str() != analytics::QUERY_DIMENSION)
            .cloned()
            .collect();
        dimensions.insert(0, analytics::QUERY_DIMENSION.to_string());

        let max = max_row_limit.clamp(1, analytics::MAX_ROW_LIMIT);
        let row_limit = self
            .row_limit
            .unwrap_or(analytics::DEFAULT_ROW_LIMIT)
            .clamp(1, max);

        SearchAnalyticsRequest {
            start_date: self.date_range.start_date().to_string(),
            end_date: self.date_range.end_date().to_string(),
            dimensions,
            row_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsRequest {
    pub start_date: String,
    pub end_date: String,
    pub dimensions: Vec<String>,
    pub row_limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SitesResponse {
    #[serde(default)]
    site_entry: Vec<Site>,
}

#[derive(Debug, Deserialize)]
struct SearchAnalyticsResponse {
    #[serde(default)]
    rows: Vec<AnalyticsRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectionRequest<'a> {
    inspection_url: &'a str,
    site_url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectionResponse {
    inspection_result: InspectionBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectionBody {
    #[serde(default)]
    index_status_result: IndexStatusResult,
}

/// [`SearchConsoleApi`] over HTTPS.
#[derive(Debug, Clone)]
pub struct SearchConsoleClient {
    http: reqwest::Client,
    api_base: Url,
    inspection_api_base: Url,
    max_row_limit: u32,
}

impl SearchConsoleClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            api_base: parse_base("api_base", config.api_base())?,
            inspection_api_base: parse_base(
                "inspection_api_base",
                config.inspection_api_base(),
            )?,
            max_row_limit: analytics::MAX_ROW_LIMIT,
        })
    }
}

#[async_trait]
impl SearchConsoleApi for SearchConsoleClient {
    async fn list_sites(&self, token: &str) -> Result<Vec<Site>> {
        let url = endpoint(&self.api_base, &["sites"]);
        debug!("-> GET {url}");

        let response: SitesResponse = get_json(self.http.get(url), token).await?;
        Ok(response.site_entry)
    }

    async fn query_analytics(
        &self,
        token: &str,
        site_url: &str,
        query: &AnalyticsQuery,
    ) -> Result<Vec<AnalyticsRow>> {
        let url = endpoint(
            &self.api_base,
            &["sites", site_url, "searchAnalytics", "query"],
        );
        let body = query.to_request(self.max_row_limit);
        debug!(
            "-> POST {url} ({} .. {}, rowLimit={})",
            body.start_date, body.end_date, body.row_limit
        );

        let response: SearchAnalyticsResponse =
            post_json(self.http.post(url), token, &body).await?;
        Ok(response.rows)
    }

    async fn inspect_url(
        &self,
        token: &str,
        site_url: &str,
        target_url: &str,
    ) -> Result<IndexStatusResult> {
        let url = endpoint(&self.inspection_api_base, &["urlInspection", "index:inspect"]);
        debug!("-> POST {url} ({target_url})");

        let body = InspectionRequest {
            inspection_url: target_url,
            site_url,
        };
        let response: InspectionResponse =
            post_json(self.http.post(url), token, &body).await?;
        Ok(response.inspection_result.index_status_result)
    }
}
