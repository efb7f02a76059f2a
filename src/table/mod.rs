//! Client-side view over fetched analytics rows
//!
//! The fetched rows are never mutated. Every view is derived by filtering
//! first and then sorting a copy.

pub mod filter;
pub mod sort;

use std::fmt;
use std::str::FromStr;

use crate::core::error::{GscoutError, Result};
use crate::core::types::AnalyticsRow;

pub use filter::{FilterCondition, FilterOperator, FilterSet, parse_filter_spec};
pub use sort::{SortDirection, SortState, sort_rows};

/// A column of the analytics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Keys,
    Clicks,
    Impressions,
    Ctr,
    Position,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Keys,
        Column::Clicks,
        Column::Impressions,
        Column::Ctr,
        Column::Position,
    ];

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Keys)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Keys => "keys",
            Column::Clicks => "clicks",
            Column::Impressions => "impressions",
            Column::Ctr => "ctr",
            Column::Position => "position",
        }
    }

    pub fn numeric_value(self, row: &AnalyticsRow) -> f64 {
        match self {
            Column::Keys => f64::NAN,
            Column::Clicks => row.clicks as f64,
            Column::Impressions => row.impressions as f64,
            Column::Ctr => row.ctr,
            Column::Position => row.position,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = GscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keys" | "key" | "query" => Ok(Column::Keys),
            "clicks" => Ok(Column::Clicks),
            "impressions" => Ok(Column::Impressions),
            "ctr" => Ok(Column::Ctr),
            "position" => Ok(Column::Position),
            _ => Err(GscoutError::Validation(format!(
                "Unknown column '{s}'. Expected one of: keys, clicks, impressions, ctr, position"
            ))),
        }
    }
}

/// Analytics rows plus the active sort and filters.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<AnalyticsRow>,
    sort: Option<SortState>,
    filters: FilterSet,
}

impl ResultTable {
    pub fn new(rows: Vec<AnalyticsRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Replace the data wholesale, e.g. after a new fetch. Sort and
    /// filters are kept.
    pub fn replace_rows(&mut self, rows: Vec<AnalyticsRow>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[AnalyticsRow] {
        &self.rows
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Header click.
    pub fn toggle_sort(&mut self, column: Column) -> SortState {
        let state = SortState::toggle(self.sort, column);
        self.sort = Some(state);
        state
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    /// Rows as displayed: filtered, then sorted.
    pub fn view(&self) -> Vec<AnalyticsRow> {
        let filtered = self.filters.apply(&self.rows);
        match self.sort {
            Some(state) => sort_rows(&filtered, state),
            None => filtered,
        }
    }
}
