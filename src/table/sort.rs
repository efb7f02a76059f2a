use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::error::{GscoutError, Result};
use crate::core::types::AnalyticsRow;
use crate::table::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = GscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(GscoutError::Validation(format!(
                "Unknown sort direction '{s}'. Expected asc or desc."
            ))),
        }
    }
}

/// The single active sort key and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click on `column`: the active column flips direction, any
    /// other column starts descending.
    pub fn toggle(current: Option<SortState>, column: Column) -> SortState {
        match current {
            Some(state) if state.column == column => {
                SortState::new(column, state.direction.flipped())
            }
            _ => SortState::new(column, SortDirection::Desc),
        }
    }
}

/// Stable sort of a copy of `rows`; equal rows keep their relative order.
pub fn sort_rows(rows: &[AnalyticsRow], state: SortState) -> Vec<AnalyticsRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, state.column);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &AnalyticsRow, b: &AnalyticsRow, column: Column) -> Ordering {
    match column {
        Column::Keys => a.primary_key().cmp(b.primary_key()),
        Column::Clicks => a.clicks.cmp(&b.clicks),
        Column::Impressions => a.impressions.cmp(&b.impressions),
        Column::Ctr => a.ctr.total_cmp(&b.ctr),
        Column::Position => a.position.total_cmp(&b.position),
    }
}
