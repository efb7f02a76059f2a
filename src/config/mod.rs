//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{analytics, endpoints, output_formats, storage, timeouts};
use crate::core::error::{GscoutError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the sites / search analytics API
    pub api_base: Option<String>,

    /// Base URL of the URL inspection API
    pub inspection_api_base: Option<String>,

    /// Profile endpoint of the identity provider
    pub userinfo_url: Option<String>,

    /// Token revocation endpoint of the identity provider
    pub revoke_url: Option<String>,

    /// Timeout in seconds for HTTP requests
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Pause between two URL inspections in milliseconds
    pub inspection_delay: Option<u64>,

    /// Rows requested per analytics query
    pub row_limit: Option<u32>,

    /// Date window (days) used when no explicit range is given
    pub default_days: Option<u32>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Directory exports are written to
    pub export_dir: Option<String>,

    /// Local key-value store file (theme, cached token)
    pub store_path: Option<String>,

    /// Environment variable holding an access token
    pub token_env: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Some(endpoints::API_BASE.to_string()),
            inspection_api_base: Some(endpoints::INSPECTION_API_BASE.to_string()),
            userinfo_url: Some(endpoints::USERINFO_URL.to_string()),
            revoke_url: Some(endpoints::REVOKE_URL.to_string()),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            user_agent: None,
            inspection_delay: Some(timeouts::DEFAULT_INSPECTION_DELAY_MS),
            row_limit: Some(analytics::DEFAULT_ROW_LIMIT),
            default_days: Some(analytics::DEFAULT_DAYS),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            export_dir: None, // Current directory
            store_path: None, // User config directory
            token_env: Some(storage::DEFAULT_TOKEN_ENV.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for unset keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GscoutError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let loaded: Config = toml::from_str(&content).map_err(|e| {
            GscoutError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(loaded);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(storage::CONFIG_FILE) {
            return config;
        }

        // Parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), storage::CONFIG_FILE);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    // Values present in `other` win.
    fn overlay(mut self, other: Config) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            api_base,
            inspection_api_base,
            userinfo_url,
            revoke_url,
            timeout,
            user_agent,
            inspection_delay,
            row_limit,
            default_days,
            output_format,
            verbose,
            export_dir,
            store_path,
            token_env
        );
        self
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref api_base) = cli_config.api_base {
            self.api_base = Some(api_base.clone());
        }
        if let Some(ref inspection_api_base) = cli_config.inspection_api_base {
            self.inspection_api_base = Some(inspection_api_base.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(delay) = cli_config.inspection_delay {
            self.inspection_delay = Some(delay);
        }
        if let Some(row_limit) = cli_config.row_limit {
            self.row_limit = Some(row_limit);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref export_dir) = cli_config.export_dir {
            self.export_dir = Some(export_dir.clone());
        }
        if let Some(ref store_path) = cli_config.store_path {
            self.store_path = Some(store_path.clone());
        }
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(endpoints::API_BASE)
    }

    pub fn inspection_api_base(&self) -> &str {
        self.inspection_api_base
            .as_deref()
            .unwrap_or(endpoints::INSPECTION_API_BASE)
    }

    pub fn userinfo_url(&self) -> &str {
        self.userinfo_url
            .as_deref()
            .unwrap_or(endpoints::USERINFO_URL)
    }

    pub fn revoke_url(&self) -> &str {
        self.revoke_url.as_deref().unwrap_or(endpoints::REVOKE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    pub fn token_env(&self) -> &str {
        self.token_env
            .as_deref()
            .unwrap_or(storage::DEFAULT_TOKEN_ENV)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get the inspection delay as Duration
    pub fn inspection_delay_duration(&self) -> Duration {
        Duration::from_millis(
            self.inspection_delay
                .unwrap_or(timeouts::DEFAULT_INSPECTION_DELAY_MS),
        )
    }

    pub fn row_limit(&self) -> u32 {
        self.row_limit.unwrap_or(analytics::DEFAULT_ROW_LIMIT)
    }

    pub fn default_days(&self) -> u32 {
        self.default_days.unwrap_or(analytics::DEFAULT_DAYS)
    }

    pub fn is_json_output(&self) -> bool {
        self.output_format.as_deref() == Some(output_formats::JSON)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Store file location: explicit path, else `<config dir>/gscout/store.json`,
    /// else the working directory.
    pub fn store_path(&self) -> PathBuf {
        if let Some(ref path) = self.store_path {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|dir| dir.join(storage::APP_DIR).join(storage::STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(storage::STORE_FILE))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(GscoutError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(GscoutError::Config(format!(
                    "Timeout of {timeout} seconds is too large. Expected at most {}.",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        if let Some(delay) = self.inspection_delay
            && delay > timeouts::MAX_INSPECTION_DELAY_MS
        {
            return Err(GscoutError::Config(format!(
                "Inspection delay of {delay}ms is too large. Expected at most {}ms.",
                timeouts::MAX_INSPECTION_DELAY_MS
            )));
        }

        if let Some(row_limit) = self.row_limit
            && !(1..=analytics::MAX_ROW_LIMIT).contains(&row_limit)
        {
            return Err(GscoutError::Config(format!(
                "Row limit {row_limit} is out of range. Expected a value between 1-{}.",
                analytics::MAX_ROW_LIMIT
            )));
        }

        if let Some(days) = self.default_days
            && days == 0
        {
            return Err(GscoutError::Config(
                "Default days cannot be 0.".to_string(),
            ));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(GscoutError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        for (name, value) in [
            ("api_base", &self.api_base),
            ("inspection_api_base", &self.inspection_api_base),
            ("userinfo_url", &self.userinfo_url),
            ("revoke_url", &self.revoke_url),
        ] {
            if let Some(value) = value
                && url::Url::parse(value).is_err()
            {
                return Err(GscoutError::Config(format!(
                    "{name} '{value}' is not a valid URL."
                )));
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Endpoints
    pub api_base: Option<String>,            // --api-base
    pub inspection_api_base: Option<String>, // --inspection-api-base

    // Network
    pub timeout: Option<u64>,       // --timeout
    pub user_agent: Option<String>, // --user-agent

    // Behavior
    pub inspection_delay: Option<u64>, // --delay
    pub row_limit: Option<u32>,        // --row-limit

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub export_dir: Option<String>,    // --out

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
    pub store_path: Option<String>,  // --store
}
