use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::constants::markers;

/// A property the authenticated user can access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Unique identifier, e.g. `https://example.com/` or `sc-domain:example.com`
    pub site_url: String,
    pub permission_level: String,
}

/// One grouped row returned by a search analytics query.
///
/// `keys` holds the dimension values in request order; the first one is
/// always the query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRow {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(deserialize_with = "deserialize_count")]
    pub clicks: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub impressions: u64,
    pub ctr: f64,
    pub position: f64,
}

impl AnalyticsRow {
    /// First dimension value (the query text), empty when the API sent none.
    pub fn primary_key(&self) -> &str {
        self.keys.first().map(String::as_str).unwrap_or("")
    }
}

// The API reports counts as JSON numbers that may carry a fractional part.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_sign_negative() || !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative count, got {value}"
        )));
    }
    Ok(value.round() as u64)
}

/// Basic profile of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Index status section of a URL inspection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatusResult {
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub coverage_state: Option<String>,
    #[serde(default)]
    pub indexing_state: Option<String>,
}

/// Indexability judgment for an inspected URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Pass,
    Fail,
    Neutral,
    /// Inspection not finished yet
    Pending,
    /// The API returned no verdict
    NotAvailable,
    /// The inspection call itself failed
    Error,
    /// Any other verdict string the API may introduce
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Neutral => "NEUTRAL",
            Verdict::Pending => markers::PENDING,
            Verdict::NotAvailable => markers::NOT_AVAILABLE,
            Verdict::Error => markers::ERROR,
            Verdict::Other(s) => s,
        }
    }
}

impl From<&str> for Verdict {
    fn from(s: &str) -> Self {
        match s {
            "PASS" => Verdict::Pass,
            "FAIL" => Verdict::Fail,
            "NEUTRAL" => Verdict::Neutral,
            markers::PENDING => Verdict::Pending,
            "" | markers::NOT_AVAILABLE => Verdict::NotAvailable,
            markers::ERROR => Verdict::Error,
            other => Verdict::Other(other.to_string()),
        }
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        Verdict::from(s.as_str())
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single inspection item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Loading,
    Success,
    Error,
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionStatus::Loading => write!(f, "loading"),
            InspectionStatus::Success => write!(f, "success"),
            InspectionStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of inspecting one URL.
///
/// Starts in [`InspectionStatus::Loading`] and moves to `Success` or `Error`
/// exactly once; later transitions are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub url: String,
    pub verdict: Verdict,
    pub coverage_state: String,
    pub indexing_state: String,
    pub status: InspectionStatus,
}

impl InspectionResult {
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            verdict: Verdict::Pending,
            coverage_state: markers::PENDING.to_string(),
            indexing_state: markers::PENDING.to_string(),
            status: InspectionStatus::Loading,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != InspectionStatus::Loading
    }

    /// Record a successful inspection. Returns false if already terminal.
    pub fn record_success(&mut self, result: IndexStatusResult) -> bool {
        if self.is_terminal() {
            return false;
        }
        let or_na = |v: Option<String>| {
            v.filter(|s| !s.is_empty())
                .unwrap_or_else(|| markers::NOT_AVAILABLE.to_string())
        };
        self.verdict = result
            .verdict
            .map(Verdict::from)
            .unwrap_or(Verdict::NotAvailable);
        self.coverage_state = or_na(result.coverage_state);
        self.indexing_state = or_na(result.indexing_state);
        self.status = InspectionStatus::Success;
        true
    }

    /// Record a failed inspection. Returns false if already terminal.
    pub fn record_error(&mut self, message: impl Into<String>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.verdict = Verdict::Error;
        self.coverage_state = message.into();
        self.status = InspectionStatus::Error;
        true
    }
}
