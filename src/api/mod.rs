//! Remote APIs
//!
//! This module talks to the search console API (sites, search analytics,
//! URL inspection) and to the identity provider that issues tokens.

pub mod client;
pub mod http;
pub mod identity;

// Re-export commonly used items
pub use client::{AnalyticsQuery, SearchAnalyticsRequest, SearchConsoleApi, SearchConsoleClient};
pub use identity::{GoogleIdentity, IdentityProvider};
