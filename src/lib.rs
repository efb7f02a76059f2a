//! gscout: search performance and URL index inspection from the terminal
//!
//! The crate fetches search analytics rows and property lists from the
//! Search Console API, inspects URLs one at a time with a pause between
//! calls, and lets the caller sort, filter and export the results.

pub mod api;
pub mod config;
pub mod core;
pub mod dates;
pub mod export;
pub mod inspection;
pub mod logging;
pub mod session;
pub mod storage;
pub mod table;
pub mod ui;

pub use crate::api::{
    AnalyticsQuery, GoogleIdentity, IdentityProvider, SearchConsoleApi, SearchConsoleClient,
};
pub use crate::config::{CliConfig, Config};
pub use crate::core::{
    AnalyticsRow, GscoutError, IndexStatusResult, InspectionResult, InspectionStatus, Result, Site,
    UserInfo, Verdict,
};
pub use crate::dates::DateRange;
pub use crate::export::{ExportFormat, Exporter};
pub use crate::inspection::{CancelHandle, InspectionRunner, InspectionSnapshot, Progress};
pub use crate::session::{Session, SessionManager};
pub use crate::storage::{LocalStore, Theme, ThemePreference};
pub use crate::table::{Column, FilterOperator, FilterSet, ResultTable, SortDirection, SortState};
