//! Reporting date ranges

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::core::constants::analytics;
use crate::core::error::{GscoutError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `YYYY-MM-DD` window; `start_date <= end_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: String,
    end_date: String,
}

impl DateRange {
    pub fn new(start_date: &str, end_date: &str) -> Result<Self> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        if start > end {
            return Err(GscoutError::Validation(format!(
                "Start date {start_date} is after end date {end_date}"
            )));
        }
        Ok(Self::from_dates(start, end))
    }

    /// The `days` days before the most recent day with data. Reporting lags
    /// by three days, so the window ends three days before `today`.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let end = today - Duration::days(analytics::DATA_DELAY_DAYS);
        let start = end - Duration::days(i64::from(days));
        Self::from_dates(start, end)
    }

    /// Same as [`DateRange::last_days`] anchored on the local clock.
    pub fn last_days_from_now(days: u32) -> Self {
        Self::last_days(days, chrono::Local::now().date_naive())
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: start.format(DATE_FORMAT).to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start_date, self.end_date)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        GscoutError::Validation(format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
    })
}
