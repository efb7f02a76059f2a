//! Local persistence
//!
//! A single JSON key-value file holds the theme preference and the
//! cached access token.

pub mod store;
pub mod theme;

pub use store::LocalStore;
pub use theme::{Theme, ThemePreference};
