use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::core::error::{GscoutError, Result};
use crate::core::types::AnalyticsRow;
use crate::table::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Case-sensitive substring of the query text
    Contains,
    /// Pattern match on the query text
    Regex,
    /// Strictly greater than
    Gt,
    /// Strictly less than
    Lt,
}

impl FilterOperator {
    /// Whether the operator applies to `column`: text operators on the query
    /// column only, comparisons on numeric columns only.
    pub fn applies_to(self, column: Column) -> bool {
        match self {
            FilterOperator::Contains | FilterOperator::Regex => !column.is_numeric(),
            FilterOperator::Gt | FilterOperator::Lt => column.is_numeric(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FilterOperator::Contains => ":",
            FilterOperator::Regex => "matches",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOperator::Contains => write!(f, "contains"),
            FilterOperator::Regex => write!(f, "regex"),
            FilterOperator::Gt => write!(f, "gt"),
            FilterOperator::Lt => write!(f, "lt"),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = GscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(FilterOperator::Contains),
            "regex" => Ok(FilterOperator::Regex),
            "gt" | ">" => Ok(FilterOperator::Gt),
            "lt" | "<" => Ok(FilterOperator::Lt),
            _ => Err(GscoutError::InvalidFilter(format!(
                "Unknown operator '{s}'. Expected contains, regex, gt or lt."
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Predicate {
    Substring(String),
    Pattern(Regex),
    Above(f64),
    Below(f64),
}

/// One user-defined condition. Construction validates the value, so an
/// invalid pattern or number is reported when the filter is added.
#[derive(Debug, Clone)]
pub struct FilterCondition {
    id: String,
    column: Column,
    operator: FilterOperator,
    value: String,
    predicate: Predicate,
}

impl FilterCondition {
    fn new(id: String, column: Column, operator: FilterOperator, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(GscoutError::InvalidFilter(
                "Filter value cannot be empty".to_string(),
            ));
        }
        if !operator.applies_to(column) {
            return Err(GscoutError::InvalidFilter(format!(
                "Operator '{operator}' cannot be used on column '{column}'"
            )));
        }

        let predicate = match operator {
            FilterOperator::Contains => Predicate::Substring(value.to_string()),
            FilterOperator::Regex => Predicate::Pattern(Regex::new(value)?),
            FilterOperator::Gt => Predicate::Above(parse_number(value)?),
            FilterOperator::Lt => Predicate::Below(parse_number(value)?),
        };

        Ok(Self {
            id,
            column,
            operator,
            value: value.to_string(),
            predicate,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, row: &AnalyticsRow) -> bool {
        match &self.predicate {
            Predicate::Substring(needle) => row.primary_key().contains(needle.as_str()),
            Predicate::Pattern(regex) => regex.is_match(row.primary_key()),
            Predicate::Above(limit) => self.column.numeric_value(row) > *limit,
            Predicate::Below(limit) => self.column.numeric_value(row) < *limit,
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator.symbol(), self.value)
    }
}

fn parse_number(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| GscoutError::InvalidFilter(format!("'{value}' is not a number")))
}

/// Ordered set of active conditions, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    conditions: Vec<FilterCondition>,
    next_id: u64,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a condition; returns its id.
    pub fn add(&mut self, column: Column, operator: FilterOperator, value: &str) -> Result<String> {
        let id = format!("f{}", self.next_id);
        let condition = FilterCondition::new(id.clone(), column, operator, value)?;
        self.next_id += 1;
        self.conditions.push(condition);
        Ok(id)
    }

    /// Add a condition written as `column:operator:value`.
    pub fn add_spec(&mut self, spec: &str) -> Result<String> {
        let (column, operator, value) = parse_filter_spec(spec)?;
        self.add(column, operator, &value)
    }

    /// Remove by id; returns whether a condition was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.id != id);
        self.conditions.len() != before
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True when `row` satisfies every condition (always true when empty).
    pub fn matches(&self, row: &AnalyticsRow) -> bool {
        self.conditions.iter().all(|c| c.matches(row))
    }

    /// Matching rows in their original order.
    pub fn apply(&self, rows: &[AnalyticsRow]) -> Vec<AnalyticsRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Split `column:operator:value`. The value may itself contain `:`.
pub fn parse_filter_spec(spec: &str) -> Result<(Column, FilterOperator, String)> {
    let mut parts = spec.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(column), Some(operator), Some(value)) => Ok((
            column
                .trim()
                .parse()
                .map_err(|e: GscoutError| GscoutError::InvalidFilter(e.message()))?,
            operator.trim().parse()?,
            value.to_string(),
        )),
        _ => Err(GscoutError::InvalidFilter(format!(
            "'{spec}' is not of the form column:operator:value"
        ))),
    }
}
