//! Sequential URL inspection
//!
//! This module normalizes user-supplied URLs against a property and
//! inspects them one by one with a fixed pause between calls.

pub mod runner;
pub mod url;

// Re-export commonly used items
pub use runner::{CancelHandle, InspectionRunner, InspectionSnapshot, Progress};
pub use url::{normalize_url, parse_url_list};
