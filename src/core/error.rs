use std::fmt;

/// Error types for gscout operations
#[derive(Debug)]
pub enum GscoutError {
    /// Token missing, expired or rejected (HTTP 401/403)
    Auth(String),

    /// Non-2xx response with the parsed or fallback message
    Api { status: u16, message: String },

    /// Transport failure
    Network(reqwest::Error),

    /// Bad user input (empty list, malformed date range, ...)
    Validation(String),

    /// Filter condition that cannot be evaluated
    InvalidFilter(String),

    /// Configuration error
    Config(String),

    /// IO error (store, exports, input files)
    Io(std::io::Error),

    /// JSON encoding or decoding error
    Json(serde_json::Error),

    /// Delimited text encoding error
    Csv(csv::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),
}

impl GscoutError {
    /// Whether the error belongs in the authentication banner rather than
    /// the data banner.
    pub fn is_auth(&self) -> bool {
        matches!(self, GscoutError::Auth(_))
    }

    /// Bare message for per-item display, without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            GscoutError::Auth(msg)
            | GscoutError::Validation(msg)
            | GscoutError::InvalidFilter(msg)
            | GscoutError::Config(msg) => msg.clone(),
            GscoutError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for GscoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GscoutError::Auth(msg) => write!(f, "Authentication error: {msg}"),
            GscoutError::Api { status, message } => write!(f, "API error ({status}): {message}"),
            GscoutError::Network(err) => write!(f, "Network error: {err}"),
            GscoutError::Validation(msg) => write!(f, "Validation error: {msg}"),
            GscoutError::InvalidFilter(msg) => write!(f, "Invalid filter: {msg}"),
            GscoutError::Config(msg) => write!(f, "Configuration error: {msg}"),
            GscoutError::Io(err) => write!(f, "IO error: {err}"),
            GscoutError::Json(err) => write!(f, "JSON error: {err}"),
            GscoutError::Csv(err) => write!(f, "CSV error: {err}"),
            GscoutError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for GscoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GscoutError::Network(err) => Some(err),
            GscoutError::Io(err) => Some(err),
            GscoutError::Json(err) => Some(err),
            GscoutError::Csv(err) => Some(err),
            GscoutError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GscoutError {
    fn from(err: std::io::Error) -> Self {
        GscoutError::Io(err)
    }
}

impl From<reqwest::Error> for GscoutError {
    fn from(err: reqwest::Error) -> Self {
        GscoutError::Network(err)
    }
}

impl From<serde_json::Error> for GscoutError {
    fn from(err: serde_json::Error) -> Self {
        GscoutError::Json(err)
    }
}

impl From<csv::Error> for GscoutError {
    fn from(err: csv::Error) -> Self {
        GscoutError::Csv(err)
    }
}

impl From<toml::de::Error> for GscoutError {
    fn from(err: toml::de::Error) -> Self {
        GscoutError::TomlParsing(err)
    }
}

impl From<regex::Error> for GscoutError {
    fn from(err: regex::Error) -> Self {
        GscoutError::InvalidFilter(err.to_string())
    }
}

/// Type alias for Results using GscoutError
pub type Result<T> = std::result::Result<T, GscoutError>;
