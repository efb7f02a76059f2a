//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, output formatting, theming and progress
//! reporting.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;
pub mod theme;

// Re-export commonly used items
pub use cli::{Cli, Commands, InspectArgs, QueryArgs, cli_to_config, validate_cli_args};
pub use output::AnalyticsReport;
pub use progress::ProgressReporter;
pub use theme::{Palette, SemanticColor};
