//! Error types for noip-update.

use thiserror::Error;

/// Result type alias for noip-update.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors that abort a run.
///
/// Transient failures (an endpoint that does not answer, a non-200
/// status) are logged and skipped where they happen and never show up
/// here.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be built.
    #[error("Network error: {0}")]
    Network(String),

    /// A discovery URL or a formatted update URL is not a valid URL.
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No discovery endpoint produced an address.
    #[error("Cannot determine IP address")]
    NoIpAddress,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for UpdateError {
    fn from(e: reqwest::Error) -> Self {
        UpdateError::Network(e.to_string())
    }
}

impl From<toml::de::Error> for UpdateError {
    fn from(e: toml::de::Error) -> Self {
        UpdateError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for UpdateError {
    fn from(e: toml::ser::Error) -> Self {
        UpdateError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for UpdateError {
    fn from(e: serde_json::Error) -> Self {
        UpdateError::Config(e.to_string())
    }
}
