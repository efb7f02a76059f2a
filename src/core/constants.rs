/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Endpoints, limits and display markers live here so the client, the
/// inspection runner and the exporters agree on them.
/// Output format constants
pub mod output_formats {
    /// Text output format - aligned, colored tables
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Export format constants
pub mod export_formats {
    pub const JSON: &str = "json";
    pub const CSV: &str = "csv";

    pub const ALL: [&str; 2] = [JSON, CSV];
}

/// Remote endpoints
pub mod endpoints {
    /// Sites and search analytics live under the webmasters v3 API
    pub const API_BASE: &str = "https://www.googleapis.com/webmasters/v3";
    /// URL inspection lives under the Search Console v1 API
    pub const INSPECTION_API_BASE: &str = "https://searchconsole.googleapis.com/v1";
    pub const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
    pub const REVOKE_URL: &str = "https://accounts.google.com/o/oauth2/revoke";
}

/// HTTP status code constants
pub mod http_status {
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Pause between two URL inspections in milliseconds
    pub const DEFAULT_INSPECTION_DELAY_MS: u64 = 500;
    /// Longest accepted pause between two URL inspections
    pub const MAX_INSPECTION_DELAY_MS: u64 = 60_000;
}

/// Search analytics query limits
pub mod analytics {
    /// Row limit used when none is requested
    pub const DEFAULT_ROW_LIMIT: u32 = 1000;
    /// Largest row limit the API accepts in one call
    pub const MAX_ROW_LIMIT: u32 = 25_000;
    /// Dimension that every query carries
    pub const QUERY_DIMENSION: &str = "query";
    /// Reporting lags real time by this many days
    pub const DATA_DELAY_DAYS: i64 = 3;
    /// Date window used when none is requested
    pub const DEFAULT_DAYS: u32 = 7;
    /// Quick date presets, in days
    pub const DATE_PRESETS: [u32; 3] = [7, 28, 90];
}

/// Markers shown for inspection results
pub mod markers {
    /// Placeholder while an inspection is in flight
    pub const PENDING: &str = "...";
    /// Field absent from the API response
    pub const NOT_AVAILABLE: &str = "N/A";
    /// Verdict recorded when the inspection call failed
    pub const ERROR: &str = "Error";
    /// Message recorded for items skipped by a cancelled run
    pub const CANCELLED: &str = "Cancelled";
}

/// Local store keys and file names
pub mod storage {
    /// Key holding the dark mode preference
    pub const DARK_MODE_KEY: &str = "darkMode";
    /// Key holding the cached access token
    pub const AUTH_TOKEN_KEY: &str = "authToken";
    /// Directory under the user config dir
    pub const APP_DIR: &str = "gscout";
    /// Store file name
    pub const STORE_FILE: &str = "store.json";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE: &str = ".gscout.toml";
    /// Environment variable consulted for an access token
    pub const DEFAULT_TOKEN_ENV: &str = "GSC_ACCESS_TOKEN";
}

/// Error message constants
pub mod error_messages {
    pub const NO_TOKEN: &str = "No token received";
    /// Search Console access plus the profile lookup done at sign-in.
    pub const REQUIRED_SCOPES: &str = "webmasters.readonly and userinfo.email";
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Runtime or API failure, or at least one inspection failed
    pub const FAILURE: i32 = 1;
    /// No usable credentials
    pub const AUTH_REQUIRED: i32 = 3;
    /// Run interrupted with Ctrl-C
    pub const INTERRUPTED: i32 = 130;
}
